#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Build a [`RuleTable`](crate::RuleTable) from `category => Direction [candidates]` lines.
///
/// ```
/// use headword::{SearchDirection, head_rules};
///
/// let table = head_rules! {
///     "NP" => RightByPosition ["NP", "NN", "NNS"],
///     "PP" => LeftByCategory ["NP"],
/// };
/// assert_eq!(table.get("NP").unwrap().direction, SearchDirection::RightByPosition);
/// ```
#[macro_export]
macro_rules! head_rules {
    ( $( $category:literal => $direction:ident [ $($candidate:literal),* $(,)? ] ),* $(,)? ) => {{
        let mut table = $crate::RuleTable::empty();
        $(
            table.insert($category, $crate::SearchDirection::$direction, &[ $($candidate),* ]);
        )*
        table
    }};
}
