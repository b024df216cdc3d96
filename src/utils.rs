use std::path::Path;

use hashbrown::HashMap;
use nalgebra::Isometry3;
use petgraph::graphmap::DiGraphMap;

use super::transform::pose_to_isometry;
use super::{Joint, Link};

pub(super) fn is_urdf_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("urdf"))
}

pub(super) fn link_index_map(robot: &urdf_rs::Robot) -> HashMap<String, usize> {
    // link_name -> link_id, ids follow document order
    robot
        .links
        .iter()
        .enumerate()
        .map(|(index, link)| (link.name.clone(), index))
        .collect()
}

pub(super) fn joint_by_child(robot: &urdf_rs::Robot) -> HashMap<String, urdf_rs::Joint> {
    // child_link_name -> joint
    robot
        .joints
        .iter()
        .map(|joint| (joint.child.link.clone(), joint.clone()))
        .collect()
}

pub(super) fn construct_link_graph(
    link_index: &HashMap<String, usize>,
    joints: &HashMap<String, urdf_rs::Joint>,
) -> DiGraphMap<usize, ()> {
    let mut graph = DiGraphMap::<usize, ()>::new();

    link_index.values().for_each(|index| {
        graph.add_node(*index);
    });

    // parent -> child for every joint between known links
    joints.values().for_each(|joint| {
        if let (Some(parent), Some(child)) = (
            link_index.get(&joint.parent.link),
            link_index.get(&joint.child.link),
        ) {
            graph.add_edge(*parent, *child, ());
        }
    });

    graph
}

pub(super) fn construct_links(
    robot: &urdf_rs::Robot,
    joints: &mut HashMap<String, urdf_rs::Joint>,
) -> Vec<Link> {
    robot
        .links
        .iter()
        .map(|link| Link {
            name: link.name.clone(),
            // filled once the tree is known
            global_zero_pose: Isometry3::identity(),
            parent_zero_pose: Isometry3::identity(),
            joint: Joint {
                urdf_joint: joints.remove(&link.name),
            },
        })
        .collect()
}

// the root is the first link no joint points to
pub(super) fn find_root(graph: &DiGraphMap<usize, ()>, link_count: usize) -> Option<usize> {
    (0..link_count).find(|index| {
        graph
            .neighbors_directed(*index, petgraph::Direction::Incoming)
            .next()
            .is_none()
    })
}

pub(super) fn fullfill_zero_poses(links: &mut [Link], graph: &DiGraphMap<usize, ()>, bfs: &[usize]) {
    for &link in bfs {
        let parent = graph
            .neighbors_directed(link, petgraph::Direction::Incoming)
            .next();
        let Some(parent) = parent else {
            continue;
        };
        let Some(relative_pose) = links[link]
            .joint
            .urdf_joint
            .as_ref()
            .map(|joint| pose_to_isometry(&joint.origin))
        else {
            continue;
        };

        // bfs order guarantees the parent pose is already final
        let global_pose = links[parent].global_zero_pose * relative_pose;
        links[link].parent_zero_pose = relative_pose;
        links[link].global_zero_pose = global_pose;
    }
}
