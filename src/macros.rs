// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand!

    // Zero-arg → String::new()
    () => {
        ::std::string::String::new()
    };
    // Any single expression — works for literals, consts, or vars
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

#[macro_export]
macro_rules! tabbed {
    // Display values joined by '\t', no trailing newline.
    ($first:expr $(, $rest:expr)* $(,)?) => {{
        let mut s = ::std::format!("{}", $first);
        $(
            s.push('\t');
            s.push_str(&::std::format!("{}", $rest));
        )*
        s
    }};
}
