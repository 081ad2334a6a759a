use itertools::iproduct;

pub fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

pub fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

pub fn slice_pairwise_ordered<T>(v: &[T]) -> impl Iterator<Item = (&T, &T)> {
    iproduct!(0..v.len(), 0..v.len())
        .filter(|(i, j)| j > i)
        .map(move |(i, j)| (&v[i], &v[j]))
}
