//! XML utilities for navigating report documents.

mod utils;

pub use utils::{
    descendants_with_tag, element_children, find_children, get_tag_name, get_text, has_tag,
    node_text,
};
