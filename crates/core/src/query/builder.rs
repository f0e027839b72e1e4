use super::filters::SearchFilters;

/// Merge the free-text query with the structured filters.
///
/// Non-sentinel filters become `preference: gender:<v>`, `age:<v>` and
/// `color:<v>` (always in that order), joined by `", "` and placed after a
/// leading `", "`, then a single space and the untouched query. With no
/// constraints the query is returned as-is.
pub fn build_query(query: &str, filters: &SearchFilters) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(3);

    if let Some(gender) = filters.gender.constraint() {
        parts.push(format!("preference: gender:{}", gender));
    }
    if let Some(age) = filters.age_range.constraint() {
        parts.push(format!("age:{}", age));
    }
    if let Some(color) = filters.color_style.constraint() {
        parts.push(format!("color:{}", color));
    }

    if parts.is_empty() {
        return query.to_string();
    }

    format!(", {} {}", parts.join(", "), query)
}
