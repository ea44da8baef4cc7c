use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use zip::CompressionMethod;
use zip::ZipArchive;

use tomo::{DocumentedEntity, EntityKind, Error, PackageConfig, build_epub};

fn open_archive(path: &Path) -> ZipArchive<fs::File> {
    ZipArchive::new(fs::File::open(path).expect("open archive")).expect("read archive")
}

fn entry_names(archive: &mut ZipArchive<fs::File>) -> Vec<String> {
    let mut names: Vec<String> = archive.file_names().map(String::from).collect();
    names.sort();
    names
}

fn read_entry(archive: &mut ZipArchive<fs::File>, name: &str) -> String {
    let mut out = String::new();
    archive
        .by_name(name)
        .expect("entry present")
        .read_to_string(&mut out)
        .expect("entry readable");
    out
}

fn demo_entities() -> Vec<DocumentedEntity> {
    vec![DocumentedEntity::new(
        "foo",
        "Foo",
        EntityKind::Module,
        "<p>The foo module.</p>",
    )]
}

#[test]
fn test_end_to_end_scenario() {
    let tmp = TempDir::new().unwrap();
    let config = PackageConfig::new("demo", "1.0.0", tmp.path().join("doc"));

    let archive_path = build_epub(&demo_entities(), &config).expect("build succeeds");
    assert!(
        archive_path.to_string_lossy().ends_with("demo-v1.0.0.epub"),
        "unexpected path: {}",
        archive_path.display()
    );

    let mut archive = open_archive(&archive_path);
    let names = entry_names(&mut archive);
    for expected in [
        "mimetype",
        "META-INF/container.xml",
        "OEBPS/content.opf",
        "OEBPS/toc.ncx",
        "OEBPS/nav.xhtml",
        "OEBPS/title.xhtml",
        "OEBPS/foo.xhtml",
    ] {
        assert!(names.contains(&expected.to_string()), "missing {expected}");
    }

    let page = read_entry(&mut archive, "OEBPS/foo.xhtml");
    assert!(page.contains("<p>The foo module.</p>"));
}

#[test]
fn test_mimetype_first_stored_uncompressed() {
    let tmp = TempDir::new().unwrap();
    let config = PackageConfig::new("demo", "1.0.0", tmp.path().join("doc"));
    let archive_path = build_epub(&demo_entities(), &config).unwrap();

    let mut archive = open_archive(&archive_path);
    {
        let first = archive.by_index(0).unwrap();
        assert_eq!(first.name(), "mimetype");
        assert_eq!(first.compression(), CompressionMethod::Stored);
    }
    assert_eq!(read_entry(&mut archive, "mimetype"), "application/epub+zip");

    // Everything else that is text gets deflated
    let opf = archive.by_name("OEBPS/content.opf").unwrap();
    assert_eq!(opf.compression(), CompressionMethod::Deflated);
}

#[test]
fn test_one_page_per_entity_and_reading_order() {
    let tmp = TempDir::new().unwrap();
    let config = PackageConfig::new("demo", "1.0.0", tmp.path().join("doc"));

    // Deliberately interleaved kinds
    let entities = vec![
        DocumentedEntity::new("sized", "Sized", EntityKind::Protocol, "<p>p</p>"),
        DocumentedEntity::new("alpha", "Alpha", EntityKind::Module, "<p>a</p>"),
        DocumentedEntity::new("bad-arg", "BadArg", EntityKind::Exception, "<p>e</p>"),
        DocumentedEntity::new("beta", "Beta", EntityKind::Module, "<p>b</p>"),
    ];

    let archive_path = build_epub(&entities, &config).unwrap();
    let mut archive = open_archive(&archive_path);

    let names = entry_names(&mut archive);
    for entity in &entities {
        let entry = format!("OEBPS/{}.xhtml", entity.id);
        assert!(names.contains(&entry), "missing {entry}");
    }

    let opf = read_entry(&mut archive, "OEBPS/content.opf");
    let spine_start = opf.find("<spine").unwrap();
    let spine = &opf[spine_start..];
    let alpha = spine.find("idref=\"alpha_xhtml\"").unwrap();
    let beta = spine.find("idref=\"beta_xhtml\"").unwrap();
    let exception = spine.find("idref=\"bad_arg_xhtml\"").unwrap();
    let protocol = spine.find("idref=\"sized_xhtml\"").unwrap();
    assert!(alpha < beta, "modules keep input order");
    assert!(beta < exception, "modules precede exceptions");
    assert!(exception < protocol, "exceptions precede protocols");
}

#[test]
fn test_supplementary_document_rendered() {
    let tmp = TempDir::new().unwrap();
    let readme = tmp.path().join("readme.md");
    fs::write(&readme, "# Welcome\n\nSee `Foo` for details.\n").unwrap();

    let config =
        PackageConfig::new("demo", "1.0.0", tmp.path().join("doc")).with_extra(&readme);
    let archive_path = build_epub(&demo_entities(), &config).unwrap();

    let mut archive = open_archive(&archive_path);
    let page = read_entry(&mut archive, "OEBPS/README.xhtml");
    assert!(page.contains("<title>README</title>"));
    assert!(page.contains("<h1>Welcome</h1>"));
    assert!(page.contains("<a href=\"foo.xhtml\">Foo</a>"));
}

#[test]
fn test_unrecognized_extension_rejected() {
    let tmp = TempDir::new().unwrap();
    let notes = tmp.path().join("notes.txt");
    fs::write(&notes, "plain text").unwrap();

    let output = tmp.path().join("doc");
    let config = PackageConfig::new("demo", "1.0.0", &output).with_extra(&notes);

    let err = build_epub(&demo_entities(), &config).unwrap_err();
    match err {
        Error::UnsupportedFormat(path) => assert_eq!(path, notes),
        other => panic!("expected UnsupportedFormat, got {other}"),
    }

    // No archive was produced
    assert!(!output.join("demo-v1.0.0.epub").exists());
}

#[test]
fn test_staging_cleanup_after_success() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("doc");
    let config = PackageConfig::new("demo", "1.0.0", &output);
    build_epub(&demo_entities(), &config).unwrap();

    assert!(!output.join("mimetype").exists());
    assert!(!output.join("META-INF").exists());
    assert!(!output.join("OEBPS").exists());
    assert!(output.join("demo-v1.0.0.epub").exists());
}

#[test]
fn test_staging_cleanup_after_failure() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("doc");
    let config = PackageConfig::new("demo", "1.0.0", &output)
        .with_extra(tmp.path().join("missing.pdf"));

    assert!(build_epub(&demo_entities(), &config).is_err());
    assert!(!output.join("mimetype").exists());
    assert!(!output.join("META-INF").exists());
    assert!(!output.join("OEBPS").exists());
}

#[test]
fn test_structural_idempotence() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("doc");
    let config = PackageConfig::new("demo", "1.0.0", &output);

    let first = build_epub(&demo_entities(), &config).unwrap();
    let mut archive = open_archive(&first);
    let first_names = entry_names(&mut archive);
    drop(archive);

    let second = build_epub(&demo_entities(), &config).unwrap();
    let mut archive = open_archive(&second);
    let second_names = entry_names(&mut archive);

    assert_eq!(first_names, second_names);
}

#[test]
fn test_logo_copied_into_assets() {
    let tmp = TempDir::new().unwrap();
    let logo = tmp.path().join("logo.png");
    fs::write(&logo, [0x89, b'P', b'N', b'G']).unwrap();

    let config =
        PackageConfig::new("demo", "1.0.0", tmp.path().join("doc")).with_logo(&logo);
    let archive_path = build_epub(&demo_entities(), &config).unwrap();

    let mut archive = open_archive(&archive_path);
    let names = entry_names(&mut archive);
    assert!(names.contains(&"OEBPS/dist/logo.png".to_string()));

    let title = read_entry(&mut archive, "OEBPS/title.xhtml");
    assert!(title.contains("<img src=\"dist/logo.png\""));

    let opf = read_entry(&mut archive, "OEBPS/content.opf");
    assert!(opf.contains("href=\"dist/logo.png\" media-type=\"image/png\""));
}

#[test]
fn test_invalid_config_rejected_before_staging() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("doc");
    fs::create_dir_all(&output).unwrap();
    fs::write(output.join("precious.txt"), "keep me").unwrap();

    let config = PackageConfig::new("", "1.0.0", &output);
    assert!(matches!(
        build_epub(&demo_entities(), &config),
        Err(Error::InvalidConfig(_))
    ));
    // Validation failed before the destructive staging step
    assert!(output.join("precious.txt").exists());
}

#[test]
fn test_static_assets_present() {
    let tmp = TempDir::new().unwrap();
    let config = PackageConfig::new("demo", "1.0.0", tmp.path().join("doc"));
    let archive_path = build_epub(&demo_entities(), &config).unwrap();

    let mut archive = open_archive(&archive_path);
    let names = entry_names(&mut archive);
    assert!(names.contains(&"OEBPS/dist/epub.css".to_string()));
    assert!(names.contains(&"OEBPS/dist/epub.js".to_string()));

    let ncx = read_entry(&mut archive, "OEBPS/toc.ncx");
    let opf = read_entry(&mut archive, "OEBPS/content.opf");
    // NCX is keyed by the same run identifier the manifest embeds
    let uid_start = ncx.find("urn:uuid:").expect("ncx identifier");
    let uid = &ncx[uid_start..uid_start + "urn:uuid:".len() + 36];
    assert!(opf.contains(uid));
}

#[test]
fn test_output_path_is_absolute() {
    let tmp = TempDir::new().unwrap();
    let config = PackageConfig::new("demo", "1.0.0", tmp.path().join("doc"));
    let archive_path: PathBuf = build_epub(&demo_entities(), &config).unwrap();
    assert!(archive_path.is_absolute());
}
