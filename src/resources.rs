use crate::models::{NewResourceRequest, Resource, ResourceView};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResourceError {
    #[error("Please provide a title and link.")]
    MissingTitleOrUrl,
    #[error("resource '{0}' not found")]
    NotFound(String),
}

/// What to do with the stored spotlight id after a removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpotlightChange {
    Keep,
    Move(String),
    Clear,
}

pub fn add_resource(
    resources: &mut Vec<Resource>,
    request: NewResourceRequest,
    now_ms: i64,
) -> Result<Resource, ResourceError> {
    let title = request.title.trim();
    let url = request.url.trim();
    if title.is_empty() || url.is_empty() {
        return Err(ResourceError::MissingTitleOrUrl);
    }

    let resource = Resource {
        id: next_resource_id(resources, now_ms),
        title: title.to_string(),
        url: url.to_string(),
        category: request.category,
        notes: request.notes.trim().to_string(),
        added: now_ms,
        completed: false,
    };
    resources.push(resource.clone());
    Ok(resource)
}

/// `resource-<ms>`, suffixed when several are added within the same millisecond.
fn next_resource_id(resources: &[Resource], now_ms: i64) -> String {
    let base = format!("resource-{now_ms}");
    let taken = |id: &str| resources.iter().any(|resource| resource.id == id);
    if !taken(&base) {
        return base;
    }
    (2..)
        .map(|suffix| format!("{base}-{suffix}"))
        .find(|candidate| !taken(candidate))
        .unwrap_or(base)
}

/// Flips the completion flag and returns the new value.
pub fn toggle_complete(resources: &mut [Resource], id: &str) -> Result<bool, ResourceError> {
    let resource = resources
        .iter_mut()
        .find(|resource| resource.id == id)
        .ok_or_else(|| ResourceError::NotFound(id.to_string()))?;
    resource.completed = !resource.completed;
    Ok(resource.completed)
}

pub fn remove_resource(
    resources: &mut Vec<Resource>,
    id: &str,
    spotlight_id: Option<&str>,
) -> Result<(Resource, SpotlightChange), ResourceError> {
    let index = resources
        .iter()
        .position(|resource| resource.id == id)
        .ok_or_else(|| ResourceError::NotFound(id.to_string()))?;
    let removed = resources.remove(index);

    let change = if spotlight_id == Some(id) {
        resources
            .first()
            .map(|next| SpotlightChange::Move(next.id.clone()))
            .unwrap_or(SpotlightChange::Clear)
    } else {
        SpotlightChange::Keep
    };

    Ok((removed, change))
}

/// Resources in `category` (`None` or `"all"` for every one), newest first.
pub fn filter_resources(resources: &[Resource], category: Option<&str>) -> Vec<Resource> {
    let category = category.map(str::trim).filter(|c| !c.is_empty() && *c != "all");
    let mut filtered: Vec<Resource> = resources
        .iter()
        .filter(|resource| category.is_none_or(|c| resource.category.as_str() == c))
        .cloned()
        .collect();
    filtered.sort_by(|a, b| b.added.cmp(&a.added));
    filtered
}

/// Resolves the featured resource. The second value is `true` when the
/// stored id was missing or stale and the first resource was chosen instead.
pub fn resolve_spotlight<'a>(
    resources: &'a [Resource],
    spotlight_id: Option<&str>,
) -> Option<(&'a Resource, bool)> {
    if let Some(found) = spotlight_id
        .and_then(|id| resources.iter().find(|resource| resource.id == id))
    {
        return Some((found, false));
    }
    resources.first().map(|first| (first, true))
}

pub fn to_view(resource: Resource, spotlight_id: Option<&str>) -> ResourceView {
    ResourceView {
        category_label: resource.category.label().to_string(),
        spotlighted: spotlight_id == Some(resource.id.as_str()),
        resource,
    }
}
