use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use super::{
    NodeType,
    node::{Node, NodeLinks},
};

/// Implementation of [CharacterData](https://www.w3.org/TR/2004/REC-DOM-Level-3-Core-20040407/DOM3-Core.html#core-ID-FF21A306)
/// interface on [1.4 Fundamental Interfaces: Core Module](https://www.w3.org/TR/2004/REC-DOM-Level-3-Core-20040407/DOM3-Core.html#core-ID-BBACDC08)
///
/// In this implementation, the character data is fixed when the node is created.
pub trait CharacterData: Node {
    /// Implementation of [`data`](https://www.w3.org/TR/2004/REC-DOM-Level-3-Core-20040407/DOM3-Core.html#core-ID-72AB8359) attribute.
    fn data(&self) -> Rc<str>;

    /// Implementation of [`length`](https://www.w3.org/TR/2004/REC-DOM-Level-3-Core-20040407/DOM3-Core.html#core-ID-7D61178C) attribute.
    ///
    /// # Note
    /// Unlike the specification,
    /// this implementation returns **the number of bytes in a UTF-8 string**.
    fn length(&self) -> usize {
        self.data().len()
    }
}

macro_rules! impl_character_data_node {
    ( $( $(#[$meta:meta])* ( $node:ident, $rf:ident, $weak:ident, $name:literal, $nt:expr ) ),* ) => {
        $(
            $(#[$meta])*
            pub struct $node {
                pub(super) links: NodeLinks,
                data: Rc<str>,
            }

            #[doc = concat!("Wrapper of `Rc<RefCell<", stringify!($node), ">>`.")]
            #[derive(Clone)]
            pub struct $rf(pub(super) Rc<RefCell<$node>>);

            impl $rf {
                pub(crate) fn new(data: impl Into<Rc<str>>) -> Self {
                    Self(Rc::new(RefCell::new($node {
                        links: NodeLinks::default(),
                        data: data.into(),
                    })))
                }

                #[doc = concat!("Generate [`", stringify!($weak), "`] from `self`.")]
                pub fn downgrade(&self) -> $weak {
                    $weak(Rc::downgrade(&self.0))
                }
            }

            impl Node for $rf {
                fn node_name(&self) -> Rc<str> {
                    $name.into()
                }

                fn node_value(&self) -> Option<Rc<str>> {
                    Some(self.data())
                }

                fn node_type(&self) -> NodeType {
                    $nt
                }

                fn text_content(&self) -> Option<String> {
                    Some(self.data().to_string())
                }
            }

            impl CharacterData for $rf {
                fn data(&self) -> Rc<str> {
                    self.0.borrow().data.clone()
                }
            }

            #[doc = concat!("Wrapper of `Weak<RefCell<", stringify!($node), ">>`.")]
            #[derive(Clone)]
            pub struct $weak(Weak<RefCell<$node>>);

            impl $weak {
                #[doc = concat!("Generate [`", stringify!($rf), "`] from `self`.")]
                /// Success conditions are the same as for [`std::rc::Weak::upgrade`].
                pub fn upgrade(&self) -> Option<$rf> {
                    self.0.upgrade().map($rf)
                }
            }
        )*
    };
}

impl_character_data_node! {
    /// Implementation of [Text](https://www.w3.org/TR/2004/REC-DOM-Level-3-Core-20040407/DOM3-Core.html#core-ID-1312295772)
    /// interface on [1.4 Fundamental Interfaces: Core Module](https://www.w3.org/TR/2004/REC-DOM-Level-3-Core-20040407/DOM3-Core.html#core-ID-BBACDC08)
    ///
    /// The data is kept verbatim. Entity and character references are not decoded.
    ( Text, TextRef, TextWeakRef, "#text", NodeType::Text ),
    /// Implementation of [Comment](https://www.w3.org/TR/2004/REC-DOM-Level-3-Core-20040407/DOM3-Core.html#core-ID-1728279322)
    /// interface on [1.4 Fundamental Interfaces: Core Module](https://www.w3.org/TR/2004/REC-DOM-Level-3-Core-20040407/DOM3-Core.html#core-ID-BBACDC08)
    ( Comment, CommentRef, CommentWeakRef, "#comment", NodeType::Comment )
}
