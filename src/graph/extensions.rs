use crate::graph::{gain::GainNode, node::GraphNode, through::Through};

pub trait NodeExt: GraphNode + Sized {
    fn through<F: GraphNode>(self, effect: F) -> Through<Self, F> {
        Through::new(self, effect)
    }

    fn gain(self, gain: f32) -> Through<Self, GainNode> {
        Through::new(self, GainNode::constant(gain))
    }
}

impl<T: GraphNode> NodeExt for T {}
