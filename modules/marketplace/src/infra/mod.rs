pub mod locks;
pub mod memory;
