/// Owning link to the next node; `None` marks the end of the list.
pub(crate) type Link = Option<Box<Node>>;

/// One element of the chain. Each node exclusively owns its successor.
#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) value: u32,
    pub(crate) next: Link,
}

impl Node {
    pub(crate) fn boxed(value: u32) -> Box<Self> {
        Box::new(Self { value, next: None })
    }
}
