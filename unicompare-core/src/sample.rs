//! Built-in sample catalog used to seed an empty store.

use crate::model::{Admissions, Cooperation, Program, University};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

fn program(id: &str, title: &str, tuition_fee: &str, description: &str) -> Program {
    Program {
        id: id.to_string(),
        title: title.to_string(),
        duration: "4 years".to_string(),
        tuition_fee: tuition_fee.to_string(),
        description: description.to_string(),
        faculty: None,
    }
}

/// Returns the fixed sample dataset, in catalog order.
pub fn sample_universities() -> Vec<University> {
    vec![
        University {
            id: "nu".to_string(),
            name: "Nazarbayev University".to_string(),
            logo_url: "https://upload.wikimedia.org/wikipedia/commons/8/8f/Nazarbayev_University_logo.png"
                .to_string(),
            location: "Astana, Kazakhstan".to_string(),
            mission_history: Some(
                "To be a leading center of education, research, and innovation in Kazakhstan.\n\n\
                 Founded in 2010 as a modern research university with international partnerships."
                    .to_string(),
            ),
            mission: None,
            history: None,
            achievements: strings(&[
                "Top research output in Central Asia",
                "Multiple QS-ranked programs",
                "State-of-the-art laboratories",
            ]),
            admissions: Admissions {
                requirements: strings(&[
                    "Completed secondary education",
                    "English proficiency (IELTS/TOEFL)",
                    "Subject-specific exams or SAT/ACT",
                ]),
                deadlines: strings(&["Fall intake: July 1", "Spring intake: December 15"]),
                scholarships: strings(&[
                    "NU Merit Scholarship",
                    "State Grant for high achievers",
                    "Research assistantships for graduate students",
                ]),
            },
            cooperation: Cooperation {
                partners: strings(&["Duke University", "University of Wisconsin-Madison"]),
                exchange_programs: strings(&["Semester abroad", "Joint research fellowships"]),
                foreign_student_info:
                    "International applicants receive visa support and dedicated onboarding."
                        .to_string(),
            },
            tour_3d_url: Some("https://my.matterport.com/show/?m=DMQnVvzHPG5".to_string()),
            programs: vec![
                program(
                    "cs-bsc",
                    "Computer Science BSc",
                    "$8,000 per year",
                    "Focus on software engineering, data science, and scalable systems.",
                ),
                program(
                    "eee-bsc",
                    "Electrical & Electronic Engineering BSc",
                    "$8,000 per year",
                    "Covers power systems, electronics, telecommunications, and control.",
                ),
            ],
        },
        University {
            id: "kbtuw".to_string(),
            name: "Kazakh-British Technical University".to_string(),
            logo_url: "https://upload.wikimedia.org/wikipedia/commons/9/95/KBTU_logo.png"
                .to_string(),
            location: "Almaty, Kazakhstan".to_string(),
            mission_history: Some(
                "Deliver world-class technical education aligned with industry needs.\n\n\
                 Established in 2001 with support from the British Council."
                    .to_string(),
            ),
            mission: None,
            history: None,
            achievements: strings(&[
                "Leading oil & gas engineering programs",
                "Strong industry partnerships with energy sector",
            ]),
            admissions: Admissions {
                requirements: strings(&[
                    "Unified National Testing (UNT) or equivalent",
                    "English proficiency for international tracks",
                ]),
                deadlines: strings(&["Fall intake: June 30"]),
                scholarships: strings(&["KBTU Excellence Grant", "Industry-sponsored grants"]),
            },
            cooperation: Cooperation {
                partners: strings(&["University of London", "Heriot-Watt University"]),
                exchange_programs: strings(&["Dual degree options", "Internships abroad"]),
                foreign_student_info:
                    "Dedicated support center for international mobility and visas.".to_string(),
            },
            tour_3d_url: Some("https://my.matterport.com/show/?m=7b2z7ogPz9K".to_string()),
            programs: vec![
                program(
                    "petro-bsc",
                    "Petroleum Engineering BSc",
                    "$6,000 per year",
                    "Reservoir engineering, drilling operations, and production management.",
                ),
                program(
                    "fin-bsc",
                    "Finance BSc",
                    "$5,500 per year",
                    "Corporate finance, fintech, and investment analysis.",
                ),
            ],
        },
        University {
            id: "aitu".to_string(),
            name: "Astana IT University".to_string(),
            logo_url:
                "https://upload.wikimedia.org/wikipedia/commons/9/9f/Astana_IT_University_logo.svg"
                    .to_string(),
            location: "Astana, Kazakhstan".to_string(),
            mission_history: Some(
                "Prepare digital leaders and innovators for Kazakhstan and the region.\n\n\
                 Founded in 2019 with a focus on IT and digital transformation."
                    .to_string(),
            ),
            mission: None,
            history: None,
            achievements: strings(&[
                "National leader in ICT education",
                "Strong startup and innovation ecosystem",
            ]),
            admissions: Admissions {
                requirements: strings(&["UNT or foundation program", "English placement test"]),
                deadlines: strings(&["Fall intake: July 15"]),
                scholarships: strings(&["Digital Talent Scholarship", "State educational grants"]),
            },
            cooperation: Cooperation {
                partners: strings(&["Cisco", "Huawei", "EPAM"]),
                exchange_programs: strings(&["Tech internships", "Erasmus+ mobility"]),
                foreign_student_info: "International office provides housing and visa support."
                    .to_string(),
            },
            tour_3d_url: Some("https://my.matterport.com/show/?m=8qkF7n4b4j7".to_string()),
            programs: vec![
                program(
                    "se-bsc",
                    "Software Engineering BSc",
                    "$4,500 per year",
                    "Full-stack development, cloud-native systems, DevOps.",
                ),
                program(
                    "cyber-bsc",
                    "Cybersecurity BSc",
                    "$4,800 per year",
                    "Network security, cryptography, and security operations.",
                ),
            ],
        },
    ]
}
