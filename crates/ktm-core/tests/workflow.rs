//! End-to-end admin workflows over the in-memory gateway.
//!
//! Covers the sequences an administrator actually goes through: adding and
//! editing records, deleting with confirmation, searching, and exporting a
//! card image.

use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tempfile::TempDir;

use ktm_core::gateway::GatewayCall;
use ktm_core::table::{delete_record, load_records};
use ktm_core::{
    CardExporter, CardPreview, CardRenderer, DeleteOutcome, DirectorySink, EmptyState, KtmError,
    MemoryGateway, Notice, PhotoAttachment, RecordForm, RecordTable, RequiredField, StudentId,
    StudentRecord, SubmitOutcome,
};

fn record(id: u64, nim: &str, name: &str) -> StudentRecord {
    StudentRecord {
        id: StudentId::from(id),
        nim: nim.to_string(),
        name: name.to_string(),
        faculty: "ILMU KOMPUTER DAN TEKNOLOGI INFORMASI".to_string(),
        major: "S1 - INFORMATIKA".to_string(),
        photo_url: None,
    }
}

fn seeded() -> MemoryGateway {
    MemoryGateway::with_records(vec![
        record(1, "50421001", "Ilham Nur"),
        record(2, "50421002", "Sari Dewi"),
        record(3, "10119003", "Budi Ilhamsyah"),
    ])
}

fn png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 40, 40, 255]));
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn exporter() -> CardExporter {
    CardExporter::new(Arc::new(CardRenderer::without_fonts()), Duration::from_millis(100))
}

// ============================================================================
// Form
// ============================================================================

/// An incomplete form never reaches the gateway
#[tokio::test]
async fn test_incomplete_form_sends_nothing() {
    let gateway = seeded();
    let mut form = RecordForm::new();
    form.set_nim("50421009");
    form.set_faculty("EKONOMI");

    let err = form.submit(&gateway).await.unwrap_err();
    match &err {
        KtmError::MissingFields(fields) => {
            assert!(fields.contains(&RequiredField::Name));
            assert!(fields.contains(&RequiredField::Major));
        }
        other => panic!("expected validation error, got {:?}", other),
    }
    assert_eq!(Notice::submit_failed(false, &err).message, "Semua field harus diisi!");
    assert!(gateway.calls().is_empty());

    // The draft survives a failed submit
    assert_eq!(form.draft().nim, "50421009");
}

#[tokio::test]
async fn test_add_then_refresh_shows_record() {
    let gateway = MemoryGateway::new();
    let mut form = RecordForm::new();
    form.set_nim("50421010");
    form.set_name("Rina Putri");
    form.set_faculty("PSIKOLOGI");
    form.set_major("S1 - PSIKOLOGI");
    form.attach_photo(PhotoAttachment::new("rina.png", png(12, 16)));

    let outcome = form.submit(&gateway).await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::Created(_)));
    assert_eq!(Notice::submitted(&outcome).message, "Data berhasil ditambahkan!");

    // Form is cleared for the next entry
    assert_eq!(form.draft().nim, "");
    assert!(form.photo().is_none());

    let records = load_records(&gateway).await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "Rina Putri");
    assert!(records[0].photo_url.is_some());
    assert_eq!(gateway.calls(), vec![GatewayCall::Create, GatewayCall::List]);
}

#[tokio::test]
async fn test_edit_keeps_photo_when_none_chosen() {
    let gateway = MemoryGateway::new();
    let mut form = RecordForm::new();
    form.set_nim("1");
    form.set_name("Old Name");
    form.set_faculty("EKONOMI");
    form.set_major("S1 - MANAJEMEN");
    form.attach_photo(PhotoAttachment::new("a.png", png(4, 4)));
    form.submit(&gateway).await.unwrap();

    let stored = gateway.records()[0].clone();
    form.begin_edit(&stored, None);
    assert!(form.is_editing());
    form.set_name("New Name");

    let outcome = form.submit(&gateway).await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::Updated(ref id, _) if *id == stored.id));
    assert!(!form.is_editing());

    let updated = &gateway.records()[0];
    assert_eq!(updated.name, "New Name");
    assert_eq!(updated.photo_url, stored.photo_url);
}

#[tokio::test]
async fn test_gateway_rejection_keeps_form() {
    let gateway = seeded();
    gateway.fail_next(400, "NIM sudah terdaftar");

    let mut form = RecordForm::new();
    form.set_nim("50421001");
    form.set_name("Duplicate");
    form.set_faculty("EKONOMI");
    form.set_major("S1 - AKUTANSI");

    let err = form.submit(&gateway).await.unwrap_err();
    assert_eq!(
        Notice::submit_failed(false, &err).message,
        "Gagal menambahkan data: NIM sudah terdaftar"
    );
    assert_eq!(form.draft().name, "Duplicate");
}

// ============================================================================
// Table
// ============================================================================

#[tokio::test]
async fn test_declined_delete_sends_nothing() {
    let gateway = seeded();

    let outcome = delete_record(&gateway, &false, &StudentId::from(2)).await.unwrap();
    assert_eq!(outcome, DeleteOutcome::Declined);
    assert!(gateway.calls().is_empty());
    assert_eq!(gateway.records().len(), 3);
}

#[tokio::test]
async fn test_confirmed_delete_then_refresh() {
    let gateway = seeded();
    let mut table = RecordTable::new();
    table.replace(load_records(&gateway).await);

    let outcome = delete_record(&gateway, &true, &StudentId::from(2)).await.unwrap();
    assert_eq!(outcome, DeleteOutcome::Deleted);
    table.replace(load_records(&gateway).await);

    assert!(table.find(&StudentId::from(2)).is_none());
    assert_eq!(table.records().len(), 2);
    assert_eq!(
        gateway.calls(),
        vec![
            GatewayCall::List,
            GatewayCall::Delete(StudentId::from(2)),
            GatewayCall::List
        ]
    );
}

#[tokio::test]
async fn test_failed_list_shows_no_records() {
    let gateway = seeded();
    gateway.set_offline(true);

    let mut table = RecordTable::new();
    assert_eq!(table.empty_state(), Some(EmptyState::Loading));

    table.replace(load_records(&gateway).await);
    assert_eq!(table.empty_state(), Some(EmptyState::NoRecords));
    assert_eq!(EmptyState::NoRecords.message(), "No students found");
}

#[tokio::test]
async fn test_search_over_loaded_records() {
    let gateway = seeded();
    let mut table = RecordTable::new();
    table.replace(load_records(&gateway).await);

    table.set_query("ILHAM");
    let names: Vec<_> = table.visible().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Ilham Nur", "Budi Ilhamsyah"]);

    table.set_query("10119");
    assert_eq!(table.visible().len(), 1);

    table.set_query("zzz");
    assert_eq!(table.empty_state(), Some(EmptyState::NoMatches));

    // Filtering never calls the gateway
    assert_eq!(gateway.calls(), vec![GatewayCall::List]);
}

// ============================================================================
// Card export
// ============================================================================

#[tokio::test]
async fn test_outside_press_closes_without_export() {
    let gateway = seeded();
    let mut preview = CardPreview::new();
    preview.show(record(1, "50421001", "Ilham Nur"));
    preview.mark_attached();

    assert!(!preview.pointer_down(true));
    assert!(preview.is_showing());
    assert!(preview.pointer_down(false));
    assert!(!preview.is_showing());

    // Closing is purely local
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn test_export_writes_double_scale_png() {
    let temp = TempDir::new().unwrap();
    let gateway = seeded();
    let surface = Mutex::new(CardPreview::new());
    let sink = DirectorySink::new(temp.path());
    let card = record(1, "50421001", "  Ilham   Nur ");

    let exported = exporter()
        .export(&gateway, &surface, &sink, &card)
        .await
        .unwrap();

    assert_eq!(exported.file_name, "KTM_Ilham_Nur.png");
    assert_eq!((exported.width, exported.height), (1600, 840));

    let bytes = std::fs::read(temp.path().join("KTM_Ilham_Nur.png")).unwrap();
    let img = image::load_from_memory(&bytes).unwrap();
    assert_eq!((img.width(), img.height()), (1600, 840));

    // Preview is torn down afterwards
    assert!(!surface.lock().is_showing());
}

fn slow_exporter() -> CardExporter {
    CardExporter::new(Arc::new(CardRenderer::without_fonts()), Duration::from_secs(5))
}

/// Viewing first means the card is already laid out; no settle wait
#[tokio::test(start_paused = true)]
async fn test_export_from_open_preview_skips_settle_delay() {
    let temp = TempDir::new().unwrap();
    let gateway = seeded();
    let card = record(1, "50421001", "Ilham Nur");

    let surface = Mutex::new(CardPreview::new());
    surface.lock().show(card.clone());
    surface.lock().mark_attached();

    let started = tokio::time::Instant::now();
    slow_exporter()
        .export(&gateway, &surface, &DirectorySink::new(temp.path()), &card)
        .await
        .unwrap();

    assert!(started.elapsed() < Duration::from_secs(5));
    assert!(!surface.lock().is_showing());
}

/// Downloading straight from the table waits for the card to lay out
#[tokio::test(start_paused = true)]
async fn test_export_without_preview_waits_settle_delay() {
    let temp = TempDir::new().unwrap();
    let gateway = seeded();
    let card = record(1, "50421001", "Ilham Nur");
    let surface = Mutex::new(CardPreview::new());

    let started = tokio::time::Instant::now();
    slow_exporter()
        .export(&gateway, &surface, &DirectorySink::new(temp.path()), &card)
        .await
        .unwrap();

    assert!(started.elapsed() >= Duration::from_secs(5));
    assert!(temp.path().join("KTM_Ilham_Nur.png").exists());
}

/// An open preview of another record still needs its own layout
#[tokio::test(start_paused = true)]
async fn test_export_of_other_record_waits_settle_delay() {
    let temp = TempDir::new().unwrap();
    let gateway = seeded();

    let surface = Mutex::new(CardPreview::new());
    surface.lock().show(record(2, "50421002", "Sari Dewi"));
    surface.lock().mark_attached();

    let started = tokio::time::Instant::now();
    slow_exporter()
        .export(
            &gateway,
            &surface,
            &DirectorySink::new(temp.path()),
            &record(1, "50421001", "Ilham Nur"),
        )
        .await
        .unwrap();

    assert!(started.elapsed() >= Duration::from_secs(5));
}

#[tokio::test]
async fn test_export_embeds_stored_photo() {
    let temp = TempDir::new().unwrap();
    let gateway = seeded();
    gateway.put_photo("/uploads/1_face.png", PhotoAttachment::new("face.png", png(60, 80)));

    let mut card = record(1, "50421001", "Ilham Nur");
    card.photo_url = Some("/uploads/1_face.png".to_string());

    let surface = Mutex::new(CardPreview::new());
    exporter()
        .export(&gateway, &surface, &DirectorySink::new(temp.path()), &card)
        .await
        .unwrap();

    assert!(gateway
        .calls()
        .contains(&GatewayCall::FetchPhoto("/uploads/1_face.png".to_string())));
    assert!(temp.path().join("KTM_Ilham_Nur.png").exists());
}

/// A missing photo leaves the slot empty but still exports
#[tokio::test]
async fn test_export_survives_missing_photo() {
    let temp = TempDir::new().unwrap();
    let gateway = seeded();

    let mut card = record(2, "50421002", "Sari Dewi");
    card.photo_url = Some("/uploads/gone.png".to_string());

    let surface = Mutex::new(CardPreview::new());
    let exported = exporter()
        .export(&gateway, &surface, &DirectorySink::new(temp.path()), &card)
        .await
        .unwrap();

    assert_eq!(exported.file_name, "KTM_Sari_Dewi.png");
    assert!(exported.path.exists());
}

#[tokio::test]
async fn test_failed_export_clears_preview() {
    let temp = TempDir::new().unwrap();
    // A file where the export directory should be
    let blocked = temp.path().join("blocked");
    std::fs::write(&blocked, b"x").unwrap();

    let gateway = seeded();
    let surface = Mutex::new(CardPreview::new());
    let result = exporter()
        .export(
            &gateway,
            &surface,
            &DirectorySink::new(&blocked),
            &record(3, "10119003", "Budi"),
        )
        .await;

    assert!(result.is_err());
    assert_eq!(Notice::export_failed().message, "Failed to download KTM");
    assert!(!surface.lock().is_showing());
}
