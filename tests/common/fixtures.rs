//! Figma document fixtures

use serde_json::{Value, json};

/// Project key used by every fixture URL
pub const PROJECT_ID: &str = "ABC123";

/// Project URL pointing at [`PROJECT_ID`]
pub const PROJECT_URL: &str = "https://www.figma.com/file/ABC123/My-Design";

/// A document node in the API's JSON shape
pub fn node(id: &str, name: &str, node_type: &str, children: Vec<Value>) -> Value {
    json!({
        "id": id,
        "name": name,
        "type": node_type,
        "children": children,
    })
}

/// A node carrying an SVG export setting
pub fn node_with_export(id: &str, name: &str, node_type: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "type": node_type,
        "exportSettings": [
            {"suffix": "", "format": "SVG", "constraint": {"type": "SCALE", "value": 1}}
        ],
    })
}

/// Full `GET files/{id}` response wrapping `pages`
pub fn document(pages: Vec<Value>) -> Value {
    json!({
        "name": "My Design",
        "lastModified": "2024-05-01T12:00:00Z",
        "thumbnailUrl": "https://s3-alpha.figma.com/thumbnails/abc",
        "version": "1234567890",
        "document": {
            "id": "0:0",
            "name": "Document",
            "type": "DOCUMENT",
            "children": pages,
        },
    })
}

/// One frame holding two slices that share the name "Icon"
pub fn icon_toolbar_document() -> Value {
    document(vec![node(
        "0:1",
        "Page 1",
        "CANVAS",
        vec![node(
            "1:1",
            "Toolbar",
            "FRAME",
            vec![
                node("1:2", "Icon", "SLICE", vec![]),
                node("1:3", "Icon", "SLICE", vec![]),
            ],
        )],
    )])
}

/// A page with `count` slices named "Asset"
pub fn many_slices_document(count: usize) -> Value {
    let slices = (0..count)
        .map(|i| node(&format!("2:{i}"), "Asset", "SLICE", vec![]))
        .collect();
    document(vec![node("0:1", "Page 1", "CANVAS", slices)])
}

/// File name a node id is rendered under by the mock server
pub fn render_file(id: &str) -> String {
    format!("{}.svg", id.replace(':', "-"))
}
