// Pure .dspreset parser and transform modules
mod parse;
mod patch;
pub mod transform;
pub mod types;

pub use transform::plan_changes;
pub use types::*;

use log::warn;
use roxmltree::Document;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Root element tag every Decent Sampler preset must carry.
pub const ROOT_TAG: &str = "DecentSampler";

/// File extension for Decent Sampler presets (without the dot).
pub const EXTENSION: &str = "dspreset";

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

#[derive(Debug, Error)]
pub enum PresetError {
    #[error("XML parse error: {0}")]
    XmlParse(#[from] roxmltree::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("not a .{EXTENSION} file: {}", .0.display())]
    Extension(PathBuf),

    #[error("not a Decent Sampler preset (root element '{0}', expected '{ROOT_TAG}')")]
    InvalidRoot(String),

    #[error("XML rewrite error: {0}")]
    Rewrite(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("rewritten document is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, PresetError>;

/// An in-memory Decent Sampler preset.
///
/// Owns the XML text plus the control list and control-type index captured
/// at load time. Applying changes rewrites the owned XML in place at the
/// event level, so markup the transform never touches keeps its original
/// bytes.
#[derive(Debug)]
pub struct Preset {
    source: String,
    controls: Vec<Control>,
    type_index: Vec<(String, usize)>,
}

impl Preset {
    /// Load a preset from disk.
    ///
    /// The path must end in `.dspreset` and exist; the root element must be
    /// `DecentSampler`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.extension().and_then(|s| s.to_str()) != Some(EXTENSION) {
            return Err(PresetError::Extension(path.to_path_buf()));
        }
        if !path.exists() {
            return Err(PresetError::NotFound(path.to_path_buf()));
        }
        let xml = std::fs::read_to_string(path)?;
        Self::parse(&xml)
    }

    /// Parse a preset from an XML string (no path checks).
    pub fn parse(xml: &str) -> Result<Self> {
        let doc = Document::parse(xml)?;
        let root = doc.root_element();
        if root.tag_name().name() != ROOT_TAG {
            return Err(PresetError::InvalidRoot(root.tag_name().name().to_owned()));
        }

        let (controls, type_index) = parse::scan_controls(&doc);
        if controls.is_empty() {
            warn!("no control elements found in the preset");
        }

        Ok(Self {
            source: xml.to_owned(),
            controls,
            type_index,
        })
    }

    /// All `control` elements in document order.
    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn control_count(&self) -> usize {
        self.controls.len()
    }

    /// Control types with occurrence counts, in first-seen document order.
    /// Controls without a `type` attribute are indexed as `"unknown"`.
    pub fn type_index(&self) -> &[(String, usize)] {
        &self.type_index
    }

    /// The current XML text of the document.
    pub fn xml(&self) -> &str {
        &self.source
    }

    /// The document text as written to disk, with an XML declaration
    /// prepended when the source had none.
    pub fn to_xml(&self) -> String {
        if self.source.trim_start().starts_with("<?xml") {
            self.source.clone()
        } else {
            format!("{}\n{}", XML_DECL, self.source)
        }
    }

    /// Overwrite the geometry attributes of every control named in
    /// `changes`, which must come from [`plan_changes`] on this preset.
    /// Returns the number of controls rewritten.
    pub fn apply(&mut self, changes: &[ChangeRecord]) -> Result<usize> {
        if changes.is_empty() {
            return Ok(0);
        }

        self.source = patch::rewrite_controls(&self.source, changes)?;

        // Keep the captured control list in sync so a later plan on the
        // same preset starts from the written values.
        for change in changes {
            let control = &mut self.controls[change.position];
            control.x = Some(change.new.x.to_string());
            control.y = Some(change.new.y.to_string());
            control.width = Some(change.new.width.to_string());
            control.height = Some(change.new.height.to_string());
        }

        Ok(changes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<DecentSampler minVersion="1.0">
  <ui width="812" height="375">
    <tab name="main">
      <control type="knob" id="attack" x="10" y="20" width="30" height="30"/>
      <control type="knob" id="release" x="50" y="20" width="30" height="30"/>
      <control type="label" label="Envelope" x="10" y="60" width="100" height="20"/>
    </tab>
  </ui>
  <groups/>
</DecentSampler>"#;

    #[test]
    fn parse_simple_preset() {
        let preset = Preset::parse(SIMPLE).unwrap();
        assert_eq!(preset.control_count(), 3);
        assert_eq!(
            preset.type_index(),
            &[("knob".to_owned(), 2), ("label".to_owned(), 1)]
        );
    }

    #[test]
    fn type_index_counts_sum_to_control_count() {
        let preset = Preset::parse(SIMPLE).unwrap();
        let total: usize = preset.type_index().iter().map(|(_, n)| n).sum();
        assert_eq!(total, preset.control_count());
    }

    #[test]
    fn wrong_root_is_rejected() {
        let result = Preset::parse(r#"<AriaSampler><control type="knob"/></AriaSampler>"#);
        assert!(matches!(result, Err(PresetError::InvalidRoot(tag)) if tag == "AriaSampler"));
    }

    #[test]
    fn malformed_xml_is_rejected() {
        assert!(matches!(
            Preset::parse("<DecentSampler><ui>"),
            Err(PresetError::XmlParse(_))
        ));
    }

    #[test]
    fn preset_without_controls_still_loads() {
        let preset = Preset::parse("<DecentSampler><groups/></DecentSampler>").unwrap();
        assert_eq!(preset.control_count(), 0);
        assert!(preset.type_index().is_empty());
    }

    #[test]
    fn missing_type_is_indexed_as_unknown() {
        let preset =
            Preset::parse(r#"<DecentSampler><ui><control x="1"/></ui></DecentSampler>"#).unwrap();
        assert_eq!(preset.type_index(), &[("unknown".to_owned(), 1)]);
    }

    #[test]
    fn load_rejects_wrong_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preset.xml");
        std::fs::write(&path, SIMPLE).unwrap();
        assert!(matches!(
            Preset::load(&path),
            Err(PresetError::Extension(_))
        ));
    }

    #[test]
    fn load_rejects_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.dspreset");
        assert!(matches!(Preset::load(&path), Err(PresetError::NotFound(_))));
    }

    #[test]
    fn load_round_trips_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("piano.dspreset");
        std::fs::write(&path, SIMPLE).unwrap();
        let preset = Preset::load(&path).unwrap();
        assert_eq!(preset.xml(), SIMPLE);
    }

    #[test]
    fn to_xml_preserves_existing_declaration() {
        let preset = Preset::parse(SIMPLE).unwrap();
        assert_eq!(preset.to_xml(), SIMPLE);
    }

    #[test]
    fn to_xml_adds_missing_declaration() {
        let preset = Preset::parse("<DecentSampler><ui/></DecentSampler>").unwrap();
        assert!(preset.to_xml().starts_with(r#"<?xml version="1.0""#));
        assert!(preset.to_xml().ends_with("</DecentSampler>"));
    }
}
