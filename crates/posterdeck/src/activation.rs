use crate::surface::Surface;

/// True when the query string of `location` contains `flag`.
///
/// Only the part after `?` is searched, so a flag appearing in the path
/// does not count. Inputs that aren't absolute URLs (`poster.html?pres`,
/// `?pres`) are split by hand.
pub fn query_flag_present(location: &str, flag: &str) -> bool {
    let query = match url::Url::parse(location) {
        Ok(url) => url.query().map(str::to_string),
        Err(_) => location
            .split_once('?')
            .map(|(_, rest)| rest.split('#').next().unwrap_or_default().to_string()),
    };
    query.is_some_and(|q| q.contains(flag))
}

pub fn root_has_class(surface: &impl Surface, root: &str, class: &str) -> bool {
    surface.has_class(root, class)
}
