mod reference;

pub use reference::LazyRef;
