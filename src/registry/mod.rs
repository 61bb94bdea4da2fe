//! Component registries.

pub mod department_registry;

pub use department_registry::DepartmentRegistry;
