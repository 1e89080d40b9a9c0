//! End-to-end tests driving the full pipeline through [`ModelBuilder`].

use lumo::model::{DeclarationKind, RefKind, RefTarget};
use lumo::{BuildError, BuilderConfig, ModelBuilder};

const SAMPLE_MODULE: &str = r#"
local json = require "dkjson"

local Queue = {}
Queue.__index = Queue

--- Creates an empty queue.
function Queue.new()
  local q = setmetatable({}, Queue)
  q.items = {}
  return q
end

--- Appends a value.
--- Silently ignores nil.
function Queue:push(value)
  if value == nil then
    return
  end
  self.items[#self.items + 1] = value
end

function Queue:pop()
  local item = self.items[1]
  table.remove(self.items, 1)
  return item
end

shared_count = 0

return Queue
"#;

#[test]
fn test_sample_module_outline() {
    let builder = ModelBuilder::default();
    let root = builder.build(SAMPLE_MODULE).expect("build");
    assert!(!root.has_errors(), "diagnostics: {:?}", root.diagnostics);

    let names: Vec<_> = root
        .model
        .all_declarations()
        .map(|d| (d.name.as_str(), d.kind))
        .collect();
    assert!(names.contains(&("Queue", DeclarationKind::Local)));
    assert!(names.contains(&("Queue.new", DeclarationKind::Function)));
    assert!(names.contains(&("Queue:push", DeclarationKind::Method)));
    assert!(names.contains(&("Queue:pop", DeclarationKind::Method)));
    assert!(names.contains(&("shared_count", DeclarationKind::Global)));

    // Doc block runs attach to the declaration below them.
    let push = root
        .model
        .all_declarations()
        .find(|d| d.name == "Queue:push")
        .expect("push declared");
    assert_eq!(push.doc.as_deref(), Some("Appends a value.\nSilently ignores nil."));
    assert_eq!(push.params, vec!["value"]);

    // `Queue.new` nests its local under the function.
    let new = root
        .model
        .all_declarations()
        .find(|d| d.name == "Queue.new")
        .expect("new declared");
    assert!(new.children.iter().any(|c| c.name == "q"));
}

#[test]
fn test_sample_module_references_and_requires() {
    let builder = ModelBuilder::default();
    let root = builder.build(SAMPLE_MODULE).expect("build");

    assert_eq!(root.model.requires.len(), 1);
    assert_eq!(root.model.requires[0].module, "dkjson");

    let setmetatable = root
        .model
        .references
        .iter()
        .find(|r| r.name == "setmetatable")
        .expect("setmetatable used");
    assert_eq!(setmetatable.kind, RefKind::Call);
    assert_eq!(setmetatable.target, RefTarget::Builtin);

    let table_ref = root
        .model
        .references
        .iter()
        .find(|r| r.name == "table")
        .expect("table used");
    assert_eq!(table_ref.target, RefTarget::Builtin);

    // `shared_count` is the only user-defined global.
    assert_eq!(root.model.globals, vec!["shared_count"]);
}

#[test]
fn test_malformed_source_still_produces_partial_model() {
    let builder = ModelBuilder::default();
    let root = builder
        .build("function first() end\nlocal = broken\nfunction second() end\n")
        .expect("build succeeds on malformed input");

    assert!(root.has_errors());
    let names: Vec<_> = root.model.all_declarations().map(|d| d.name.as_str()).collect();
    assert!(names.contains(&"first"));
    assert!(names.contains(&"second"));
}

#[test]
fn test_require_resolution_against_search_path() {
    let dir = std::env::temp_dir().join(format!("lumo_it_{}", std::process::id()));
    let pkg = dir.join("app");
    std::fs::create_dir_all(&pkg).expect("mkdir");
    std::fs::write(pkg.join("core.lua"), "return {}\n").expect("write module");

    let builder = ModelBuilder::new(BuilderConfig::default().with_search_path(&dir));
    let root = builder
        .build("local core = require 'app.core'\nlocal missing = require 'app.other'\n")
        .expect("build");

    assert_eq!(root.model.requires.len(), 2);
    assert_eq!(
        root.model.requires[0].resolved.as_deref(),
        Some(pkg.join("core.lua").as_path())
    );
    assert!(root.model.requires[1].resolved.is_none());

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_builder_lifecycle() {
    let builder = ModelBuilder::default();
    assert_eq!(builder.stats().generation, 0);

    builder.build("x = 1\n").expect("build");
    builder.build("y = 2\n").expect("build");
    let stats = builder.stats();
    assert_eq!(stats.generation, 1, "engine is created once and reused");
    assert_eq!(stats.builds, 2);

    builder.close();
    assert!(matches!(builder.build("z = 3\n"), Err(BuildError::Closed)));
}

#[test]
fn test_json_export_round() {
    let builder = ModelBuilder::default();
    let root = builder.build("--- Doc.\nfunction f(a, ...) end\n").expect("build");
    let json = root.to_json().expect("serialize");

    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    let decl = &value["model"]["declarations"][0];
    assert_eq!(decl["name"], "f");
    assert_eq!(decl["kind"], "global");
    assert_eq!(decl["params"][0], "a");
    assert_eq!(decl["is_vararg"], true);
    assert_eq!(decl["doc"], "Doc.");
    assert_eq!(value["line_count"], 3);
}

#[test]
fn test_line_and_column_mapping() {
    use lumo::diagnostics::LineIndex;

    let source = "x = 1\n\"oops";
    let builder = ModelBuilder::default();
    let root = builder.build(source).expect("build");
    assert!(root.has_errors());

    let index = LineIndex::new(source);
    let first_error = root.errors().next().expect("error present");
    let (line, col) = index.line_col(first_error.span.start);
    assert_eq!((line, col), (2, 1));
}
