//! Global CSS styles for KTM Admin.
//!
//! Campus palette: deep purple with a yellow accent, matching the card.

pub const GLOBAL_STYLES: &str = r#"
/* === CSS Custom Properties === */
:root {
  --purple: #4b2a7b;
  --purple-dark: #2e1650;
  --purple-soft: #efe9f7;
  --yellow: #f5c518;

  --surface: #ffffff;
  --background: #f4f4f8;
  --border: #dcdce6;

  --text-primary: #1f1f2b;
  --text-secondary: #5a5a6e;
  --text-muted: #8c8ca1;

  --success: #1e9e5a;
  --danger: #d93844;
  --info: #2f6fd6;

  --font-sans: 'Inter', 'Segoe UI', Arial, sans-serif;
  --radius: 8px;
}

* { box-sizing: border-box; }

body {
  margin: 0;
  background: var(--background);
  color: var(--text-primary);
  font-family: var(--font-sans);
  font-size: 14px;
}

.startup-error {
  padding: 2rem;
  color: var(--danger);
}

/* === Layout === */
.admin-page {
  max-width: 1040px;
  margin: 0 auto;
  padding: 1.5rem;
  display: flex;
  flex-direction: column;
  gap: 1.25rem;
}

.admin-header {
  border-bottom: 3px solid var(--yellow);
  padding-bottom: 0.75rem;
}

.app-title {
  margin: 0;
  color: var(--purple);
  font-size: 1.75rem;
}

.app-subtitle {
  margin: 0.25rem 0 0;
  color: var(--text-secondary);
}

/* === Notices === */
.notice {
  display: flex;
  align-items: center;
  justify-content: space-between;
  padding: 0.75rem 1rem;
  border-radius: var(--radius);
  border: 1px solid transparent;
}

.notice-info {
  background: #e8f6ee;
  border-color: var(--success);
  color: var(--success);
}

.notice-error {
  background: #fdecee;
  border-color: var(--danger);
  color: var(--danger);
}

/* === Buttons === */
.btn-primary,
.btn-secondary,
.btn-edit,
.btn-danger,
.btn-download {
  border: 1px solid transparent;
  border-radius: var(--radius);
  padding: 0.5rem 1rem;
  font: inherit;
  cursor: pointer;
  transition: filter 150ms ease, transform 150ms ease;
}

.btn-primary:hover,
.btn-secondary:hover,
.btn-edit:hover,
.btn-danger:hover,
.btn-download:hover {
  filter: brightness(1.08);
  transform: translateY(-1px);
}

button:disabled {
  opacity: 0.6;
  cursor: not-allowed;
  transform: none;
}

.btn-primary { background: var(--purple); color: #fff; }
.btn-secondary { background: var(--surface); border-color: var(--border); color: var(--text-primary); }
.btn-edit { background: var(--yellow); color: var(--purple-dark); }
.btn-danger { background: var(--danger); color: #fff; }
.btn-download { background: var(--info); color: #fff; }

.icon-btn {
  background: transparent;
  border: none;
  font-size: 1.25rem;
  line-height: 1;
  cursor: pointer;
  color: inherit;
}

/* === Form === */
.record-form {
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 1.25rem;
}

.form-title,
.table-title {
  margin: 0 0 1rem;
  font-size: 1.15rem;
  color: var(--purple-dark);
}

.form-grid {
  display: grid;
  grid-template-columns: repeat(2, minmax(0, 1fr));
  gap: 0.75rem 1rem;
}

.form-field {
  display: flex;
  flex-direction: column;
  gap: 0.3rem;
}

.input-label {
  font-weight: 600;
  color: var(--text-secondary);
}

.input-field {
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 0.5rem 0.65rem;
  font: inherit;
  background: var(--surface);
}

.input-field:focus {
  outline: none;
  border-color: var(--purple);
  box-shadow: 0 0 0 3px var(--purple-soft);
}

.form-photo {
  display: flex;
  align-items: center;
  gap: 1rem;
  margin-top: 1rem;
}

.photo-preview {
  width: 96px;
  height: 128px;
  object-fit: cover;
  border-radius: var(--radius);
  border: 1px solid var(--border);
}

.photo-preview--empty {
  display: flex;
  align-items: center;
  justify-content: center;
  text-align: center;
  color: var(--text-muted);
  font-size: 0.8rem;
}

.photo-picker__error {
  margin-top: 0.4rem;
  color: var(--danger);
  font-size: 0.85rem;
}

.form-actions {
  display: flex;
  gap: 0.5rem;
  margin-top: 1rem;
}

/* === Table === */
.record-table {
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 1.25rem;
}

.table-toolbar {
  display: flex;
  align-items: center;
  justify-content: space-between;
  gap: 1rem;
}

.search-input-wrapper {
  display: flex;
  align-items: center;
  gap: 0.4rem;
}

.search-input { width: 260px; }

table.students {
  width: 100%;
  border-collapse: collapse;
}

table.students th,
table.students td {
  padding: 0.55rem 0.5rem;
  border-bottom: 1px solid var(--border);
  text-align: left;
  vertical-align: middle;
}

table.students th {
  background: var(--purple);
  color: #fff;
  font-weight: 600;
}

table.students--loading tbody { opacity: 0.6; }

.empty-row td {
  text-align: center;
  color: var(--text-muted);
  padding: 1.5rem;
}

.row-photo {
  width: 40px;
  height: 53px;
  object-fit: cover;
  border-radius: 4px;
}

.no-photo { color: var(--text-muted); }

.row-actions {
  display: flex;
  flex-wrap: wrap;
  gap: 0.35rem;
}

.row-actions button {
  padding: 0.3rem 0.6rem;
  font-size: 0.8rem;
}

/* === Card preview === */
.modal-overlay {
  position: fixed;
  inset: 0;
  background: rgba(20, 10, 35, 0.7);
  display: flex;
  align-items: center;
  justify-content: center;
  z-index: 1000;
  padding: 2rem;
}

.card-modal {
  background: var(--surface);
  border-radius: 12px;
  padding: 1.25rem;
  box-shadow: 0 20px 50px rgba(0, 0, 0, 0.35);
}

.card-modal__header {
  display: flex;
  align-items: center;
  justify-content: space-between;
  margin-bottom: 0.75rem;
}

.modal-title {
  margin: 0;
  font-size: 1.1rem;
  color: var(--purple-dark);
}

.ktm-card {
  width: 800px;
  height: 420px;
  border-radius: 16px;
  overflow: hidden;
}

.ktm-card svg { display: block; }

.modal-actions {
  display: flex;
  justify-content: flex-end;
  margin-top: 0.75rem;
}
"#;
