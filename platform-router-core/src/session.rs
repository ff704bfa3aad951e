//! One transfer query from loading to result
//!
//! The model is built in the background while the caller waits for the user
//! to pick platforms. The pick arrives through a [`SelectionSender`] from
//! whatever interface presents the catalog.

use std::{
    sync::mpsc::{self, Receiver, SyncSender},
    thread,
    time::Instant,
};

use log::{debug, info};

use crate::{
    Error,
    cancel::Cancellation,
    loading::{StationModelConfig, create_station_model, station_model_from_snapshot},
    model::{MapSnapshot, PlatformCatalog, StationModel, StationModelMeta},
    routing::{RouteSelection, TransferPlan, plan_transfer},
    station::{SpineResolver, build_catalog},
};

/// Sending half of the selection handoff
#[derive(Debug)]
pub struct SelectionSender(SyncSender<RouteSelection>);

impl SelectionSender {
    /// Delivers the selection. Consumes the sender, only one selection is
    /// accepted per session.
    ///
    /// # Errors
    ///
    /// [`Error::SelectionAborted`] if the session is already gone.
    pub fn send(self, selection: RouteSelection) -> Result<(), Error> {
        self.0.send(selection).map_err(|_| Error::SelectionAborted)
    }
}

/// Receiving half of the selection handoff
#[derive(Debug)]
pub struct SelectionReceiver(Receiver<RouteSelection>);

impl SelectionReceiver {
    /// Blocks until the selection arrives.
    ///
    /// # Errors
    ///
    /// [`Error::SelectionAborted`] if the sender is dropped without sending.
    pub fn wait(self) -> Result<RouteSelection, Error> {
        self.0.recv().map_err(|_| Error::SelectionAborted)
    }
}

pub fn selection_channel() -> (SelectionSender, SelectionReceiver) {
    let (tx, rx) = mpsc::sync_channel(1);
    (SelectionSender(tx), SelectionReceiver(rx))
}

/// Loads the configured extract and answers one transfer query.
///
/// `on_catalog` receives the platforms matching `search_term` once the
/// model is ready; the selection is awaited afterwards.
///
/// # Errors
///
/// Any loading or planning error, [`Error::SelectionAborted`] if no
/// selection is delivered, [`Error::Cancelled`] if `cancel` fires.
pub fn run_session<F>(
    config: &StationModelConfig,
    search_term: &str,
    selection: SelectionReceiver,
    on_catalog: F,
    cancel: &Cancellation,
) -> Result<TransferPlan, Error>
where
    F: FnOnce(&PlatformCatalog),
{
    run_with(
        || create_station_model(config, cancel),
        search_term,
        selection,
        on_catalog,
        cancel,
    )
}

/// Same as [`run_session`] over an already parsed snapshot
///
/// # Errors
///
/// See [`run_session`].
pub fn run_session_on_snapshot<F>(
    snapshot: MapSnapshot,
    meta: StationModelMeta,
    search_term: &str,
    selection: SelectionReceiver,
    on_catalog: F,
    cancel: &Cancellation,
) -> Result<TransferPlan, Error>
where
    F: FnOnce(&PlatformCatalog),
{
    run_with(
        || station_model_from_snapshot(snapshot, meta, cancel),
        search_term,
        selection,
        on_catalog,
        cancel,
    )
}

fn run_with<B, F>(
    build: B,
    search_term: &str,
    selection: SelectionReceiver,
    on_catalog: F,
    cancel: &Cancellation,
) -> Result<TransferPlan, Error>
where
    B: FnOnce() -> Result<StationModel, Error> + Send,
    F: FnOnce(&PlatformCatalog),
{
    let started = Instant::now();
    let model = thread::scope(|scope| {
        let handle = scope.spawn(build);
        handle
            .join()
            .map_err(|_| Error::UnrecoverableError("station model thread panicked"))?
    })?;
    info!("{} (ready after {:?})", model.summary(), started.elapsed());

    let catalog = build_catalog(&model.snapshot, search_term);
    report_spines(&model, &catalog);
    on_catalog(&catalog);

    debug!("Waiting for platform selection");
    let selection = selection.wait()?;
    cancel.check()?;

    plan_transfer(&model, &catalog, &selection, cancel)
}

/// Logs platforms whose spine cannot be found before any service is chosen
fn report_spines(model: &StationModel, catalog: &PlatformCatalog) {
    let spines = SpineResolver::for_model(model).resolve_catalog(catalog);
    let mut failed = 0;
    for (platform, spine) in &spines {
        if let Err(e) = spine {
            debug!("Platform {platform}: {e}");
            failed += 1;
        }
    }
    info!(
        "Resolved spines of {} of {} served platforms",
        spines.len() - failed,
        spines.len()
    );
}
