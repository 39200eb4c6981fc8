use chrono::NaiveDate;

use crate::models::candidate::{Candidate, CandidateStatus};

const DEMO_PHOTO: &str = "/api/placeholder/40/40";

/// Where the candidate collection comes from. Switches from `Live` to `Demo`
/// once, on the first failed read, and stays there until told otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataSource {
    #[default]
    Live,
    Demo,
}

impl DataSource {
    pub fn is_demo(&self) -> bool {
        matches!(self, DataSource::Demo)
    }
}

#[allow(clippy::too_many_arguments)]
fn demo(
    id: i64,
    name: &str,
    email: &str,
    phone: &str,
    status: CandidateStatus,
    registered: (i32, u32, u32),
    position: &str,
    notes: &str,
) -> Candidate {
    let (y, m, d) = registered;
    Candidate {
        id,
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        position: Some(position.to_string()),
        status,
        registered_date: NaiveDate::from_ymd_opt(y, m, d),
        notes: Some(notes.to_string()),
        photo_url: Some(DEMO_PHOTO.to_string()),
    }
}

/// Fixed dataset shown while the backend is unreachable.
pub fn demo_candidates() -> Vec<Candidate> {
    vec![
        demo(
            1,
            "Ana García",
            "ana.garcia@ejemplo.com",
            "555-1234",
            CandidateStatus::Active,
            (2025, 3, 15),
            "Desarrollador Frontend",
            "Experiencia de 3 años en React y Angular. Disponible para incorporación inmediata.",
        ),
        demo(
            2,
            "Carlos López",
            "carlos.lopez@ejemplo.com",
            "555-5678",
            CandidateStatus::InProcess,
            (2025, 3, 20),
            "Diseñador UX/UI",
            "Portfolio impresionante. Pendiente segunda entrevista con el equipo de diseño.",
        ),
        demo(
            3,
            "María Rodríguez",
            "maria.rodriguez@ejemplo.com",
            "555-9012",
            CandidateStatus::Active,
            (2025, 3, 18),
            "Desarrollador Backend",
            "Experiencia con Node.js y bases de datos SQL/NoSQL. Disponible a partir del 15 de mayo.",
        ),
        demo(
            4,
            "Javier Martínez",
            "javier.martinez@ejemplo.com",
            "555-3456",
            CandidateStatus::InProcess,
            (2025, 3, 25),
            "DevOps Engineer",
            "Conocimientos avanzados en AWS y Docker. Pendiente prueba técnica.",
        ),
    ]
}
