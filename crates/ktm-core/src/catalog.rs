//! Faculty catalog
//!
//! The closed set of faculties and the majors offered by each. A record's
//! major is only valid together with its faculty.

/// Faculty → majors, majors in display order.
pub const FACULTY_MAJORS: &[(&str, &[&str])] = &[
    (
        "KEDOKTERAN",
        &["S1 - KEDOKTERAN", "PENDIDIKAN PROFESI DOKTER"],
    ),
    (
        "ILMU KOMPUTER DAN TEKNOLOGI INFORMASI",
        &[
            "S1 - TEKNIK ELEKTRO",
            "S1 - SISTEM KOMPUTER",
            "S1 - SISTEM INFORMASI",
        ],
    ),
    (
        "KESEHATAN DAN FARMASI",
        &["S1 - KEBIDANAN", "S1 - FARMASI", "PENDIDIKAN PROFESI BIDAN"],
    ),
    (
        "TEKNIK SIPIL DAN PERENCANAAN",
        &["S1 - TEKNIK SIPIL", "S1 - DESAIN INTERIOR", "S1 - ARSITEKTUR"],
    ),
    (
        "EKONOMI",
        &["S1 - MANAJEMEN", "S1 - EKONOMI SYARIAH", "S1 - AKUTANSI"],
    ),
    (
        "PSIKOLOGI",
        &["S1 - PSIKOLOGI", "PENDIDIKAN PROFESI PSIKOLOGI"],
    ),
    (
        "TEKNOLOGI INDUSTRI",
        &[
            "S1 - TEKNIK MESIN",
            "S1 - TEKNIK INFORMATIKA",
            "S1 - TEKNIK INDUSTRI",
            "S1 - TEKNIK ELEKTRO",
            "S1 - INFORMATIKA",
            "S1 - AGROTEKNOLOGI",
        ],
    ),
    (
        "SASTRA DAN BUDAYA",
        &["S1 - SASTRA TIONGKOK", "S1 - SASTRA INGGRIS", "S1 - PARIWISATA"],
    ),
    ("ILMU KOMUNIKASI", &["S1 - ILMU KOMUNIKASI"]),
];

/// All faculties, sorted alphabetically for selection lists.
pub fn faculties() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = FACULTY_MAJORS.iter().map(|(f, _)| *f).collect();
    names.sort_unstable();
    names
}

/// Majors offered by `faculty`; empty for an unknown or empty faculty.
pub fn majors_for(faculty: &str) -> &'static [&'static str] {
    FACULTY_MAJORS
        .iter()
        .find(|(f, _)| *f == faculty)
        .map(|(_, majors)| *majors)
        .unwrap_or(&[])
}

/// Whether `major` may be combined with `faculty`.
pub fn is_valid_pair(faculty: &str, major: &str) -> bool {
    majors_for(faculty).contains(&major)
}
