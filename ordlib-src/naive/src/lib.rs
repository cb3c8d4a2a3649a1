use inner::doc_inline_reexport;

doc_inline_reexport! {
    sorted_vec,
}
