#![allow(dead_code)]

pub mod temp_files {
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicUsize, Ordering};

    static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

    /// Write `content` to `<dir>/spec_<n>/<name>` so the file name stays exactly `name`.
    pub fn create_spec_in(dir: &Path, name: &str, content: &str) -> PathBuf {
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::SeqCst);
        let sub = dir.join(format!("spec_{counter}"));
        std::fs::create_dir_all(&sub).unwrap();
        let path = sub.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }
}

pub mod docs {
    pub const PET_STORE_YAML: &str = r#"openapi: 3.1.0
info:
  title: Pet Store
  version: "1.0.0"
paths:
  /pets:
    get:
      operationId: list_pets
      responses:
        "200":
          description: OK
"#;

    pub const MY_API_JSON: &str = r#"{
  "openapi": "3.1.0",
  "info": { "title": "My API", "version": "2.1.0" },
  "paths": {}
}"#;

    pub const SWAGGER_V2: &str = r#"swagger: "2.0"
info:
  title: Legacy Orders
  version: "1"
paths: {}
"#;

    pub const NO_TITLE: &str = r#"openapi: 3.1.0
info:
  version: "1.0.0"
paths: {}
"#;
}
