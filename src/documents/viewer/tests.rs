use parking_lot::RwLock;
use std::sync::Arc;

use super::*;

#[derive(Clone, Default)]
struct MockLoader {
    available: Arc<RwLock<Vec<(PathBuf, usize)>>>,
}

impl MockLoader {
    fn add(&self, path: &str, page_count: usize) {
        self.available.write().push((PathBuf::from(path), page_count));
    }
}

impl DocumentLoader for MockLoader {
    fn locate(&self, path: &Path) -> PathBuf {
        path.to_path_buf()
    }

    fn load(&self, path: &Path) -> Result<LoadedDocument> {
        self.available
            .read()
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, page_count)| LoadedDocument {
                page_count: *page_count,
            })
            .ok_or_else(|| anyhow!("not found"))
    }
}

#[test]
fn opens_on_first_page() {
    let loader = MockLoader::default();
    loader.add("docs/word-1.pdf", 3);
    let mut viewer = Viewer::new(loader);
    let document = viewer
        .load(Path::new("docs/word-1.pdf"), "Word Document 1")
        .unwrap();
    assert_eq!(document.page_count, 3);
    assert_eq!(viewer.page(), 1);
}

#[test]
fn page_navigation_is_bounded() {
    let loader = MockLoader::default();
    loader.add("a.pdf", 2);
    let mut viewer = Viewer::new(loader);
    assert!(!viewer.next_page());
    viewer.load(Path::new("a.pdf"), "A").unwrap();
    assert!(!viewer.previous_page());
    assert!(viewer.next_page());
    assert!(!viewer.next_page());
    assert_eq!(viewer.page(), 2);
    assert!(viewer.previous_page());
    assert_eq!(viewer.page(), 1);
}

#[test]
fn loading_resets_page() {
    let loader = MockLoader::default();
    loader.add("a.pdf", 5);
    loader.add("b.pdf", 5);
    let mut viewer = Viewer::new(loader);
    viewer.load(Path::new("a.pdf"), "A").unwrap();
    viewer.next_page();
    viewer.load(Path::new("b.pdf"), "B").unwrap();
    assert_eq!(viewer.page(), 1);
}

#[test]
fn failed_load_can_be_retried() {
    let loader = MockLoader::default();
    let mut viewer = Viewer::new(loader.clone());
    assert!(viewer.retry().is_err());

    assert!(viewer.load(Path::new("late.pdf"), "Late").is_err());
    assert!(viewer.get_current().is_none());
    assert_eq!(viewer.failed_title(), Some("Late"));
    assert!(viewer.retry().is_err());

    loader.add("late.pdf", 4);
    let document = viewer.retry().unwrap();
    assert_eq!(document.title, "Late");
    assert_eq!(viewer.failed_title(), None);
}

#[test]
fn zoom_in_steps_and_caps() {
    let mut viewer = Viewer::new(MockLoader::default());
    assert!(viewer.zoom_in());
    assert_eq!(viewer.scale(), 1.25);
    let mut steps = 1;
    while viewer.zoom_in() {
        steps += 1;
    }
    assert_eq!(steps, 16);
    assert_eq!(viewer.scale(), MAX_ZOOM);
    assert_eq!(viewer.zoom_percent(), 500);
}

#[test]
fn zoom_out_uses_fine_steps_below_one() {
    let mut viewer = Viewer::new(MockLoader::default());
    assert!(viewer.zoom_out());
    assert_eq!(viewer.zoom_percent(), 90);
    while viewer.zoom_out() {}
    assert_eq!(viewer.scale(), MIN_ZOOM);

    assert!(viewer.zoom_in());
    assert_eq!(viewer.zoom_percent(), 60);
}

#[test]
fn zoom_out_above_one_uses_coarse_steps() {
    let mut viewer = Viewer::new(MockLoader::default());
    viewer.zoom_in();
    viewer.zoom_in();
    assert_eq!(viewer.zoom_percent(), 150);
    viewer.zoom_out();
    assert_eq!(viewer.zoom_percent(), 125);
}

#[test]
fn downloads_the_open_document() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.pdf"), "%PDF-1.4 /Type /Page >>").unwrap();
    let mut viewer = Viewer::new(PdfFileLoader::new(dir.path().to_path_buf()));
    let target = dir.path().join("downloads");
    assert!(viewer.download(&target, "A.pdf").is_err());

    viewer.load(Path::new("a.pdf"), "A").unwrap();
    let saved = viewer.download(&target, "A.pdf").unwrap();
    assert_eq!(saved, target.join("A.pdf"));
    assert!(saved.exists());
}

#[test]
fn file_loader_counts_pages() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = b"%PDF-1.4\n1 0 obj << /Type /Pages /Kids [2 0 R 3 0 R] /Count 2 >> endobj\n\
                2 0 obj << /Type /Page /Parent 1 0 R >> endobj\n\
                3 0 obj << /Type/Page /Parent 1 0 R >> endobj\n%%EOF";
    std::fs::write(dir.path().join("doc.pdf"), &pdf[..]).unwrap();
    std::fs::write(dir.path().join("fake.pdf"), "hello").unwrap();

    let loader = PdfFileLoader::new(dir.path().to_path_buf());
    assert_eq!(
        loader.load(Path::new("doc.pdf")).unwrap(),
        LoadedDocument { page_count: 2 }
    );
    assert!(loader.load(Path::new("fake.pdf")).is_err());
    assert!(loader.load(Path::new("missing.pdf")).is_err());
}
