/// Builds a [`Document`](crate::Document) from section, key and value expressions.
///
/// Sections are created in the order written; repeating a section name adds
/// to the existing section, and repeating a key replaces its value in place.
/// Use `""` for the default section.
///
/// # Examples
///
/// ```rust
/// use ini_doc::ini;
///
/// let doc = ini! {
///     "" => { "version" => "2" },
///     "server" => {
///         "host" => "localhost",
///         "port" => 8080.to_string(),
///     },
///     "empty" => {},
/// };
///
/// assert_eq!(doc.get_str("", "version"), Some("2"));
/// assert_eq!(doc.get_str("server", "port"), Some("8080"));
/// assert_eq!(doc.sections().count(), 3);
/// ```
#[macro_export]
macro_rules! ini {
    () => {
        $crate::Document::new()
    };

    ($($section:expr => { $($key:expr => $value:expr),* $(,)? }),+ $(,)?) => {{
        let mut document = $crate::Document::new();
        $(
            #[allow(unused_variables)]
            let body = &mut document.search_section($section).body;
            $(
                body.upsert_property($key, $value);
            )*
        )+
        document
    }};
}
