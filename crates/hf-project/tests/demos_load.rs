use std::path::{Path, PathBuf};

fn demos() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/projects")
}

#[test]
fn demos_load_and_lint_clean() {
    let demo_files = [
        "01_packaged_rooftop.yaml",
        "02_vav_chilled_water.yaml",
        "03_service_hot_water.yaml",
    ];

    for name in demo_files {
        let path = demos().join(name);
        let root = hf_project::load(&path).unwrap_or_else(|e| panic!("Failed to load {name}: {e}"));
        assert_eq!(root.tag, hf_project::ROOT_TAG);
        let findings = hf_project::lint_document(&root);
        assert!(findings.is_empty(), "{name}: {findings:?}");
    }
}
