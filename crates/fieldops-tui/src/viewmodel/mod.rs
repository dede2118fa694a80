//! View models
//!
//! State and logic per view, kept free of rendering so the list/edit/
//! assignment/photo behaviors are unit-testable.

pub mod assign_vm;
pub mod create_vm;
pub mod detail_vm;
pub mod fields;
pub mod list_vm;
pub mod photos_vm;
pub mod visit_vm;

pub use assign_vm::AssignVm;
pub use create_vm::CreateVm;
pub use detail_vm::DetailVm;
pub use list_vm::ListVm;
pub use photos_vm::PhotosVm;
pub use visit_vm::VisitVm;
