//! Typed depth-first traversal over a parsed HTML tree
//!
//! The walk yields element and text nodes in document order. Subtrees can be
//! pruned up front with a predicate, or skipped by the caller after an element
//! has been yielded.

use scraper::{ElementRef, Node};

/// A node visited during a document walk
#[derive(Debug, Clone, Copy)]
pub enum DocNode<'a> {
    /// An element node
    Element(ElementRef<'a>),

    /// A text node
    Text(&'a str),
}

impl<'a> DocNode<'a> {
    /// Returns the lowercase tag name for element nodes
    pub fn tag_name(&self) -> Option<&'a str> {
        match self {
            Self::Element(element) => Some(element.value().name()),
            Self::Text(_) => None,
        }
    }
}

/// Lazy depth-first iterator over an element and its descendants
///
/// Elements for which `prune` returns true are neither yielded nor descended
/// into. A walk is finite; to restart, build a new one from the same root.
pub struct DocumentWalk<'a, P>
where
    P: Fn(&ElementRef<'a>) -> bool,
{
    stack: Vec<DocNode<'a>>,
    expand: Option<ElementRef<'a>>,
    prune: P,
}

impl<'a, P> DocumentWalk<'a, P>
where
    P: Fn(&ElementRef<'a>) -> bool,
{
    /// Starts a walk at `root`
    pub fn new(root: ElementRef<'a>, prune: P) -> Self {
        Self {
            stack: vec![DocNode::Element(root)],
            expand: None,
            prune,
        }
    }

    /// Skips the descendants of the element yielded last
    pub fn skip_subtree(&mut self) {
        self.expand = None;
    }

    fn push_children(&mut self, element: ElementRef<'a>) {
        let children: Vec<DocNode<'a>> = element
            .children()
            .filter_map(|child| match child.value() {
                Node::Element(_) => ElementRef::wrap(child).map(DocNode::Element),
                Node::Text(text) => Some(DocNode::Text(&**text)),
                _ => None,
            })
            .collect();

        self.stack.extend(children.into_iter().rev());
    }
}

impl<'a, P> Iterator for DocumentWalk<'a, P>
where
    P: Fn(&ElementRef<'a>) -> bool,
{
    type Item = DocNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(element) = self.expand.take() {
            self.push_children(element);
        }

        while let Some(node) = self.stack.pop() {
            match node {
                DocNode::Element(element) => {
                    if (self.prune)(&element) {
                        continue;
                    }
                    self.expand = Some(element);
                    return Some(node);
                }
                DocNode::Text(_) => return Some(node),
            }
        }

        None
    }
}
