/// Builds a [`Table`](crate::Table) of the given capacity from `key => value` pairs.
///
/// Evaluates to `Result<Table<_, _>, TableError>`. Pairs are inserted in order
/// with [`Table::set`](crate::Table::set), so pairs that do not fit are dropped.
///
/// ```
/// use collections::table;
///
/// let t = table![4; "peti" => 1, "sina" => 2].unwrap();
/// assert_eq!(t.get("sina"), Some(&2));
/// ```
#[macro_export]
macro_rules! table {
    ( $cap: expr ) => {
        $crate::Table::new($cap)
    };
    ( $cap: expr; $( $key: expr => $value: expr ),* $(,)? ) => {
        $crate::Table::new($cap).map(|mut t| {
            $( t.set($key, $value); )*
            t
        })
    };
}
