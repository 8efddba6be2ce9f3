#![allow(dead_code)]

use std::io::Write;

use restmapper::convert::ArgValue;
use restmapper::manifest::HandlerSet;

pub const BOOKSTORE_YAML: &str = r#"
routes:
  - template: /
    method: GET
    handler: root
  - template: /books
    method: GET
    handler: list_books
    params:
      - { name: limit, kind: int, source: query, required: false }
  - template: /books
    method: POST
    handler: create_book
    roles: [ROLE_EDITOR]
    params:
      - { name: book, kind: json, source: body }
  - template: /books/{id}
    method: GET
    handler: get_book
    params:
      - { name: id, kind: long }
  - template: /books/{id}/chapters/{n}.{format}
    method: GET
    handler: get_chapter
    params:
      - { name: id, kind: long }
      - { name: n, kind: short }
      - { name: format, kind: string }
  - template: /archive/by-date/{year}-{month}-{day}
    method: GET
    handler: archive_day
    params:
      - { name: year, kind: int }
      - { name: month, kind: int }
      - { name: day, kind: int }
"#;

/// Write `content` to a temp file with the given extension.
pub fn manifest_file(content: &str, ext: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("restmapper_test_")
        .suffix(&format!(".{ext}"))
        .tempfile()
        .unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Handlers that echo their arguments back as a JSON array.
pub fn echo_handlers() -> HandlerSet {
    let mut set = HandlerSet::new();
    for name in [
        "root",
        "list_books",
        "create_book",
        "get_book",
        "get_chapter",
        "archive_day",
    ] {
        set.insert(name, |args: &[ArgValue]| Ok(Some(serde_json::to_value(args)?)));
    }
    set
}
