use std::{fs::File, io::BufReader, path::Path};

use log::info;
use osmpbfreader::{OsmId, OsmObj, OsmPbfReader};

use crate::{
    Error,
    model::{ElementId, MapSnapshot, Member, Node, NodeId, Relation, RelationId, Tags, Way, WayId},
};

/// Reads every node, way and relation of a `.osm.pbf` file into a snapshot
///
/// # Errors
///
/// Returns an error if the file cannot be opened or a block fails to decode
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<MapSnapshot, Error> {
    let path = path.as_ref();
    info!("Reading OSM data from {}", path.display());

    let file = File::open(path)?;
    let mut reader = OsmPbfReader::new(BufReader::new(file));
    let mut snapshot = MapSnapshot::new();

    for obj in reader.iter() {
        let obj = obj.map_err(|e| Error::Osm(e.to_string()))?;
        match obj {
            OsmObj::Node(node) => snapshot.insert_node(Node::new(
                NodeId(node.id.0),
                node.lon(),
                node.lat(),
                convert_tags(&node.tags),
            )),
            OsmObj::Way(way) => snapshot.insert_way(Way {
                id: WayId(way.id.0),
                nodes: way.nodes.iter().map(|n| NodeId(n.0)).collect(),
                tags: convert_tags(&way.tags),
            }),
            OsmObj::Relation(relation) => snapshot.insert_relation(Relation {
                id: RelationId(relation.id.0),
                members: relation
                    .refs
                    .iter()
                    .map(|r| Member::new(convert_id(r.member), r.role.to_string()))
                    .collect(),
                tags: convert_tags(&relation.tags),
            }),
        }
    }

    info!(
        "Loaded {} nodes, {} ways, {} relations",
        snapshot.nodes.len(),
        snapshot.ways.len(),
        snapshot.relations.len()
    );
    Ok(snapshot)
}

fn convert_tags(tags: &osmpbfreader::Tags) -> Tags {
    tags.iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn convert_id(id: OsmId) -> ElementId {
    match id {
        OsmId::Node(n) => ElementId::Node(NodeId(n.0)),
        OsmId::Way(w) => ElementId::Way(WayId(w.0)),
        OsmId::Relation(r) => ElementId::Relation(RelationId(r.0)),
    }
}
