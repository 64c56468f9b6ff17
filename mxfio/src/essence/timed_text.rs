//! Timed text: the manifest provided by the embedder describes the
//! document and its ancillary resources; the essence itself is the
//! verbatim document, clip wrapped, with resources in generic stream
//! partitions.

use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct TimedTextAncillaryResource {
    pub resource_id: Uuid,
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// Profile and resource description for one timed text track.
#[derive(Clone, Debug)]
pub struct TimedTextManifest {
    /// Profile designator, e.g. an IMSC text profile name.
    pub profile_designator: String,
    pub encoding: String,
    pub namespace_uri: String,
    pub languages: Vec<String>,
    pub resource_id: Uuid,
    pub ancillary_resources: Vec<TimedTextAncillaryResource>,
}

impl TimedTextManifest {
    pub fn new(namespace_uri: &str) -> TimedTextManifest {
        TimedTextManifest {
            profile_designator: String::new(),
            encoding: "UTF-8".to_string(),
            namespace_uri: namespace_uri.to_string(),
            languages: Vec::new(),
            resource_id: Uuid::new_v4(),
            ancillary_resources: Vec::new(),
        }
    }

    pub fn language_tag_list(&self) -> String {
        self.languages.join(",")
    }
}
