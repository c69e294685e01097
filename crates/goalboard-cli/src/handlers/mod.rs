pub mod goal;
pub mod template;
