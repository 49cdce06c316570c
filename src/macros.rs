/// Builds a [`Value`](crate::Value) from a JSON-like literal.
///
/// Keys are string literals. Any other expression goes through
/// [`to_value`](crate::to_value) and becomes `Null` if it cannot be represented.
///
/// ```rust
/// use serde_wson::{wson, Value};
///
/// let value = wson!({
///     "name": "Alice",
///     "tags": ["admin", "dev"],
///     "manager": null
/// });
/// assert_eq!(value.get("manager"), Some(&Value::Null));
/// ```
#[macro_export]
macro_rules! wson {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::wson!($elem)),*])
    };

    ({}) => {
        $crate::Value::Object($crate::WsonMap::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::WsonMap::new();
        $(
            object.insert($key.to_string(), $crate::wson!($value));
        )*
        $crate::Value::Object(object)
    }};

    ($s:expr) => {{
        $crate::to_value(&$s).unwrap_or($crate::Value::Null)
    }};
}
