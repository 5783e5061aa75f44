//! Document paths used in violation descriptions.
//!
//! A path is built by plain concatenation while descending: `.name` for an
//! object member and `[i]` for an array element. The root is the empty
//! string, so a defect in the third order's total reads `.orders[2].total`.
//! Paths are diagnostic only and never influence parsing.

/// The document root.
pub const ROOT: &str = "";

/// Path of member `name` inside the object at `parent`.
///
/// Names are appended verbatim, including any punctuation they carry.
///
/// # Example
/// ```
/// use json_expectations_core::path;
/// assert_eq!(path::member(".orders[2]", "total"), ".orders[2].total");
/// assert_eq!(path::member(path::ROOT, "Spec!al::Property"), ".Spec!al::Property");
/// ```
pub fn member(parent: &str, name: &str) -> String {
    let mut path = String::with_capacity(parent.len() + name.len() + 1);
    path.push_str(parent);
    path.push('.');
    path.push_str(name);
    path
}

/// Path of element `index` inside the array at `parent`.
pub fn index(parent: &str, index: usize) -> String {
    format!("{parent}[{index}]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_path_construction() {
        let orders = member(ROOT, "orders");
        let third = index(&orders, 3);
        assert_eq!(member(&third, "total"), ".orders[3].total");
    }

    #[test]
    fn test_root_index() {
        assert_eq!(index(ROOT, 0), "[0]");
    }
}
