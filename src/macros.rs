/// Builds a [`Node`](crate::Node) from an inline literal.
///
/// ```rust
/// use yamlite::node;
///
/// let tree = node!({
///     "name": "demo",
///     "ports": [80, 443],
///     "debug": false,
/// });
/// assert_eq!(tree["ports"][1].as_i64(), Some(443));
/// ```
#[macro_export]
macro_rules! node {
    (null) => {
        $crate::Node::Nil
    };

    (true) => {
        $crate::Node::Bool(true)
    };

    (false) => {
        $crate::Node::Bool(false)
    };

    ([]) => {
        $crate::Node::List(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Node::List(vec![$($crate::node!($elem)),*])
    };

    ({}) => {
        $crate::Node::Dict($crate::NodeMap::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut entries = $crate::NodeMap::new();
        $(
            entries.insert($key.to_string(), $crate::node!($value));
        )*
        $crate::Node::Dict(entries)
    }};

    // Fallback: anything convertible through `From`.
    ($other:expr) => {
        $crate::Node::from($other)
    };
}
