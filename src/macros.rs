#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Build a [`PatternRule`](crate::PatternRule) from a regex literal, a
/// canonical template, and an optional list of repeat-group declarations:
///
/// ```ignore
/// pattern_rule! {
///     regex: r"\W?(?<words>(?:\w+\s*)+)\W*",
///     template: "${words}",
///     repeats: [("word" in "words", r"\w+")],
/// }
/// ```
#[macro_export]
macro_rules! pattern_rule {
    (
        regex: $pat:literal,
        template: $template:literal
        $(, repeats: [ $( ($name:literal in $within:literal, $element:literal) ),* $(,)? ] )?
        $(,)?
    ) => {
        $crate::PatternRule {
            regex: $crate::regex!($pat),
            template: $template,
            repeats: vec![ $( $( $crate::Repeat {
                name: $name,
                within: $within,
                element: $crate::regex!($element),
            } ),* )? ],
        }
    };
}
