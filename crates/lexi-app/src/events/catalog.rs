use lexi_core::gate::{
    DiscoveryFilter, DurationFilter, discover, discover_articles, group_by_level, is_locked,
};
use lexi_types::CefrLevel;

use crate::events::Reader;
use crate::ui::{ViewUpdate, render_discovery, render_home, render_hub, render_path};

pub async fn handle_show_home(reader: &mut Reader) -> anyhow::Result<()> {
    let profile = reader.state.profile().await;
    let screen = render_home(
        &reader.state.catalog,
        &profile,
        reader.state.catalog_error.as_deref(),
    );
    reader.view_tx.send(ViewUpdate::Screen(screen)).await?;
    Ok(())
}

pub async fn handle_show_hub(reader: &mut Reader, hub_id: &str) -> anyhow::Result<()> {
    let catalog = &reader.state.catalog;
    let Some(hub) = catalog.hub(hub_id) else {
        return reader.status(format!("Unknown hub: {hub_id}")).await;
    };

    let profile = reader.state.profile().await;
    let groups = group_by_level(hub, &catalog.courses, &profile);
    reader
        .view_tx
        .send(ViewUpdate::Screen(render_hub(hub, &groups)))
        .await?;
    Ok(())
}

pub async fn handle_show_path(reader: &mut Reader, path_id: &str) -> anyhow::Result<()> {
    let catalog = &reader.state.catalog;
    let Some(path) = catalog.learning_path(path_id) else {
        return reader.status(format!("Unknown learning path: {path_id}")).await;
    };

    let profile = reader.state.profile().await;
    let courses: Vec<_> = catalog
        .path_courses(path)
        .into_iter()
        .map(|course| (course, is_locked(course, &profile, None)))
        .collect();
    reader
        .view_tx
        .send(ViewUpdate::Screen(render_path(path, &courses)))
        .await?;
    Ok(())
}

/// `hub=<id> level=<level> duration=<short|medium|long>` filters; all other
/// words form the search query
pub fn parse_discovery(input: &str) -> Result<DiscoveryFilter, String> {
    let mut filter = DiscoveryFilter::default();
    let mut query = Vec::new();

    for part in input.split_whitespace() {
        match part.split_once('=') {
            Some(("hub", hub)) => filter.hub = Some(hub.to_string()),
            Some(("level", level)) => {
                filter.level =
                    Some(CefrLevel::parse(level).ok_or_else(|| format!("Unknown level: {level}"))?)
            }
            Some(("duration", duration)) => {
                filter.duration = DurationFilter::parse(duration)
                    .ok_or_else(|| format!("Unknown duration: {duration}"))?
            }
            _ => query.push(part),
        }
    }

    filter.query = query.join(" ");
    Ok(filter)
}

pub async fn handle_discover(reader: &mut Reader, input: &str) -> anyhow::Result<()> {
    let filter = match parse_discovery(input) {
        Ok(filter) => filter,
        Err(message) => return reader.status(message).await,
    };

    let profile = reader.state.profile().await;
    let catalog = &reader.state.catalog;
    let listings = discover(&catalog.courses, &catalog.hubs, &filter, &profile);
    let articles = discover_articles(&catalog.articles, &filter);
    reader
        .view_tx
        .send(ViewUpdate::Screen(render_discovery(&listings, &articles)))
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovery_input_splits_filters_from_query() {
        let filter = parse_discovery("phrasal hub=vocabulary level=b1 verbs duration=long").unwrap();
        assert_eq!(filter.query, "phrasal verbs");
        assert_eq!(filter.hub.as_deref(), Some("vocabulary"));
        assert_eq!(filter.level, Some(CefrLevel::B1));
        assert_eq!(filter.duration, DurationFilter::Long);

        assert!(parse_discovery("level=Z9").is_err());
        assert_eq!(parse_discovery("").unwrap(), DiscoveryFilter::default());
    }
}
