use crate::{error::ErrorTree, node::VisitableNode};

///
/// Event
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Event {
    Enter,
    Exit,
}

///
/// Visitor
///

pub trait Visitor {
    fn visit<N: VisitableNode + ?Sized>(&mut self, node: &N, event: Event);
}

///
/// ValidateVisitor
///
/// Runs node-local validation over the whole tree, filing each node's
/// errors under the route of nodes entered so far.
///

#[derive(Debug, Default)]
pub struct ValidateVisitor {
    pub errors: ErrorTree,
    route: Vec<String>,
}

impl ValidateVisitor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Visitor for ValidateVisitor {
    fn visit<N: VisitableNode + ?Sized>(&mut self, node: &N, event: Event) {
        match event {
            Event::Enter => {
                self.route.push(node.route_key());

                if let Err(errs) = node.validate() {
                    let path = self.route.iter().map(String::as_str);
                    self.errors.merge_at_path(path, errs);
                }
            }
            Event::Exit => {
                self.route.pop();
            }
        }
    }
}
