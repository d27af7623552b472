use crate::types::Control;
use roxmltree::Document;

/// Scan every descendant element named `control` in document order and
/// build the control-type occurrence index (first-seen order).
pub(crate) fn scan_controls(doc: &Document) -> (Vec<Control>, Vec<(String, usize)>) {
    let mut controls = Vec::new();
    let mut type_index: Vec<(String, usize)> = Vec::new();

    let nodes = doc
        .root_element()
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "control");

    for (position, node) in nodes.enumerate() {
        let control = Control {
            position,
            control_type: node.attribute("type").map(str::to_owned),
            ident: node
                .attribute("id")
                .or_else(|| node.attribute("label"))
                .unwrap_or("unnamed")
                .to_owned(),
            x: node.attribute("x").map(str::to_owned),
            y: node.attribute("y").map(str::to_owned),
            width: node.attribute("width").map(str::to_owned),
            height: node.attribute("height").map(str::to_owned),
        };

        let type_name = control.type_name();
        match type_index.iter_mut().find(|(name, _)| name == type_name) {
            Some((_, count)) => *count += 1,
            None => type_index.push((type_name.to_owned(), 1)),
        }

        controls.push(control);
    }

    (controls, type_index)
}
