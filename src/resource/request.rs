//! Request href post-processors
//!
//! Requests are frequently reached through some other resource's tree, so
//! their generic href can point anywhere below a cluster. These processors
//! rescope it to `.../clusters/<cluster>/requests/<id>` and expose the
//! schedule that created the request, if any.

use super::processor::PostProcessor;
use super::schema::Schema;
use super::types::ResourceType;
use crate::api::ApiRequest;
use crate::error::{HrefError, Result};
use crate::href::{path_segment, HrefSegments};
use crate::tree::{TreeNode, HREF_PROPERTY};
use serde_json::Value;
use std::sync::Arc;

const CLUSTERS: &str = "clusters";
const REQUESTS: &str = "requests";
const REQUEST_SCHEDULES: &str = "request_schedules";

/// Property holding the id of the schedule that created a request
pub const SOURCE_SCHEDULE_ID_PROPERTY: &str = "Requests/request_schedule_id";

/// Side property receiving the derived schedule link
pub const SOURCE_SCHEDULE_HREF_PROPERTY: &str = "source_schedule_href";

/// Rewrites a request href to be scoped under its cluster
#[derive(Debug, Clone)]
pub struct RequestHrefProcessor {
    schema: Arc<dyn Schema>,
}

impl RequestHrefProcessor {
    pub const NAME: &'static str = "request_href";

    pub fn new(schema: Arc<dyn Schema>) -> Self {
        Self { schema }
    }

    /// Rewrite `href` for the request identified by `request_id`.
    ///
    /// A single trailing slash is ignored. An href naming the `requests`
    /// collection gets the id appended; otherwise everything after the
    /// cluster name is replaced with `requests/<id>`. An href without a
    /// cluster scope is echoed segment by segment and gets no id.
    pub fn rewrite(href: &str, request_id: &str) -> String {
        let href = href.strip_suffix('/').unwrap_or(href);

        if href == REQUESTS || href.ends_with("/requests") {
            return format!("{}/{}", href, request_id);
        }

        let segments = HrefSegments::parse(href);
        match segments.scoped_prefix(CLUSTERS) {
            Ok(Some(prefix)) => format!("{}{}/{}", prefix, REQUESTS, request_id),
            Ok(None) => {
                tracing::warn!("Request href '{}' has no cluster scope, leaving as is", href);
                segments.rejoin()
            }
            Err(e) => {
                tracing::warn!("{}, leaving request href as is", e);
                segments.rejoin()
            }
        }
    }
}

impl PostProcessor for RequestHrefProcessor {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn process(&self, _request: &ApiRequest, node: &mut TreeNode, href: &str) -> Result<()> {
        let Some(resource) = node.object() else {
            return Ok(());
        };

        let request_id = self.schema.key_value(resource)?;
        let rewritten = Self::rewrite(href, &request_id);
        tracing::debug!("request {}: href {} -> {}", request_id, href, rewritten);

        node.set_property(HREF_PROPERTY, rewritten);
        Ok(())
    }
}

/// Derives `source_schedule_href` for requests created by a schedule
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceScheduleHrefProcessor;

impl SourceScheduleHrefProcessor {
    pub const NAME: &'static str = "request_source_schedule_href";

    /// Link to schedule `schedule_id` in the cluster that `href` is scoped to.
    ///
    /// Fails when `clusters` is the last segment of `href`. Without any
    /// cluster segment the whole href is kept as the prefix.
    pub fn schedule_href(href: &str, schedule_id: &str) -> Result<String> {
        let segments = HrefSegments::parse(href);
        let prefix = match segments.scoped_prefix(CLUSTERS)? {
            Some(prefix) => prefix,
            None => {
                tracing::warn!("Request href '{}' has no cluster scope", href);
                segments.rejoin()
            }
        };

        Ok(format!("{}{}/{}", prefix, REQUEST_SCHEDULES, schedule_id))
    }
}

impl PostProcessor for SourceScheduleHrefProcessor {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn process(&self, _request: &ApiRequest, node: &mut TreeNode, href: &str) -> Result<()> {
        let Some(resource) = node.object() else {
            return Ok(());
        };

        let schedule_id = match resource.property_value(SOURCE_SCHEDULE_ID_PROPERTY) {
            None | Some(Value::Null) => return Ok(()),
            Some(value) => path_segment(value).ok_or_else(|| HrefError::UnsupportedKeyValue {
                resource_type: ResourceType::Request,
                property: SOURCE_SCHEDULE_ID_PROPERTY.to_string(),
            })?,
        };

        let schedule_href = Self::schedule_href(href, &schedule_id)?;
        tracing::debug!("request schedule {}: {}", schedule_id, schedule_href);

        node.set_property(SOURCE_SCHEDULE_HREF_PROPERTY, schedule_href);
        Ok(())
    }
}
