/// Re-exports each leaf crate both as a module and glob-wise, with
/// `#[doc(inline)]` so that the category crate documents its items in
/// place.
#[macro_export]
macro_rules! doc_inline_reexport {
    ( $($lib:ident),* $(,)? ) => { $(
        #[doc(inline)]
        pub use $lib::{self, *};
    )* };
}
