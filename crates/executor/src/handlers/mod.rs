//! Built-in command variants.
//!
//! Each submodule supplies the per-record step for one kind of command:
//!
//! | Module | Variant | Target | Adapter calls |
//! |--------|---------|--------|---------------|
//! | `create` | Create | none | `create` |
//! | `create_for_parent` | CreateForParent | parent id | `get` on the parent, `create` |
//! | `update` | Update | record id | `update` |
//! | `delete` | Delete | record id | `delete` |

mod create;
mod create_for_parent;
mod delete;
mod update;

pub use create::Create;
pub use create_for_parent::CreateForParent;
pub use delete::Delete;
pub use update::Update;
