use crate::context::{CONFIG_FILE, ShellContext};
use crate::render::Terminal;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const TEST_CONFIG: &str = r#"
archives:
  - key: blog
    title: My Blog
    path: archives/blog
  - key: photos
    path: archives/photos
"#;

/// Create a datsh home with two archives and load a context for it.
///
/// `blog` contains:
///
/// ```text
/// /.dat/
/// /about.md
/// /drafts/one/
/// /drafts/two/
/// /posts/2023/hello.md
/// /posts/2024/
/// ```
///
/// `photos` contains `/summer/`.
pub(crate) fn create_test_home() -> (TempDir, ShellContext) {
    let temp_dir = TempDir::new().unwrap();
    let home = temp_dir.path();

    fs::write(home.join(CONFIG_FILE), TEST_CONFIG).unwrap();

    let blog = home.join("archives/blog");
    mkdirs(&blog, &[".dat", "drafts/one", "drafts/two", "posts/2023", "posts/2024"]);
    fs::write(blog.join("about.md"), "About me\n").unwrap();
    fs::write(blog.join("posts/2023/hello.md"), "# Hello\n").unwrap();

    let photos = home.join("archives/photos");
    mkdirs(&photos, &["summer"]);

    let ctx = ShellContext::load(home).unwrap();
    (temp_dir, ctx)
}

fn mkdirs(root: &Path, dirs: &[&str]) {
    for dir in dirs {
        fs::create_dir_all(root.join(dir)).unwrap();
    }
}

/// Everything written to a test terminal.
pub(crate) fn output(term: Terminal<Vec<u8>>) -> String {
    String::from_utf8(term.into_inner()).unwrap()
}
