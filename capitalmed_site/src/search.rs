// Command-palette search over site pages and doctors.
//
// The palette indexes 17 site pages and 8 featured doctors. Each entry is
// matched through one combined search text (English and Arabic titles,
// keywords and descriptions for pages; names, specialties and the word
// "doctor" in both languages for doctors) scored by `score()`:
//
//   empty query              → 1.0   (everything matches)
//   text starts with query   → 1.0
//   text contains query      → 0.8
//   some query words appear  → 0.5 × matched / total words
//   otherwise                → 0.0
//
// Matching is case-insensitive. `search()` keeps entries with a non-zero
// score, best first; ties keep index order (pages, then doctors).
//
// Selecting a recent search term re-resolves it to a page through
// `resolve_recent()`, which falls back to the home page.

use serde::Serialize;

/// Which palette section a page is listed under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageGroup {
    Main,
    Explore,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PageEntry {
    pub title: &'static str,
    pub title_ar: &'static str,
    pub href: &'static str,
    pub keywords: &'static [&'static str],
    pub description: &'static str,
    pub description_ar: &'static str,
    pub group: PageGroup,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DoctorEntry {
    pub name: &'static str,
    pub name_ar: &'static str,
    pub specialty: &'static str,
    pub specialty_ar: &'static str,
    pub rating: f32,
}

/// Where every doctor result links to.
pub const DOCTORS_HREF: &str = "/doctors";

/// Fallback target for unresolvable recent searches.
pub const HOME_HREF: &str = "/";

macro_rules! page {
    ($title:expr, $title_ar:expr, $href:expr, [$($kw:expr),* $(,)?], $desc:expr, $desc_ar:expr, $group:ident) => {
        PageEntry {
            title: $title,
            title_ar: $title_ar,
            href: $href,
            keywords: &[$($kw),*],
            description: $desc,
            description_ar: $desc_ar,
            group: PageGroup::$group,
        }
    };
}

// One row per page, laid out as a table.
#[rustfmt::skip]
pub static PAGES: [PageEntry; 17] = [
    page!("Home", "الرئيسية", "/", ["home", "main", "landing", "الرئيسية"], "Back to homepage", "العودة للصفحة الرئيسية", Main),
    page!("About Us", "من نحن", "/about", ["about", "history", "mission", "vision", "من نحن"], "Our story & mission", "قصتنا ورسالتنا", Main),
    page!("Services", "الخدمات", "/services", ["services", "medical", "healthcare", "treatment", "خدمات"], "Medical services offered", "الخدمات الطبية المقدمة", Main),
    page!("Find a Doctor", "ابحث عن طبيب", "/doctors", ["doctor", "physician", "specialist", "find", "طبيب"], "Browse our medical team", "تصفح فريقنا الطبي", Main),
    page!("Contact Us", "اتصل بنا", "/contact", ["contact", "phone", "email", "address", "اتصل"], "Get in touch", "تواصل معنا", Main),
    page!("Facilities", "المرافق", "/facilities", ["facilities", "building", "campus", "hospital", "مرافق"], "Our world-class facilities", "مرافقنا العالمية", Explore),
    page!("Medical Tourism", "السياحة العلاجية", "/medical-tourism", ["tourism", "travel", "international", "patient", "سياحة", "علاجية"], "International patient services", "خدمات المرضى الدوليين", Explore),
    page!("Research", "الأبحاث", "/research", ["research", "science", "innovation", "study", "أبحاث"], "Innovation & research", "الابتكار والبحث", Explore),
    page!("Partnerships", "الشراكات", "/partnerships", ["partnership", "collaborate", "partner", "شراكات"], "Our global partners", "شركاؤنا العالميون", Explore),
    page!("Development Phases", "مراحل التطوير", "/development-phases", ["development", "phases", "construction", "progress", "تطوير", "مراحل"], "Project milestones", "مراحل المشروع", Explore),
    page!("Investment", "الاستثمار", "/investment", ["investment", "invest", "finance", "opportunity", "استثمار"], "Investment opportunities", "فرص الاستثمار", Explore),
    page!("Insurance & Billing", "التأمين والفواتير", "/insurance", ["insurance", "billing", "payment", "coverage", "تأمين", "فواتير"], "Insurance & payment info", "معلومات التأمين والدفع", Explore),
    page!("News", "الأخبار", "/news", ["news", "updates", "press", "media", "أخبار"], "Latest updates", "آخر الأخبار", Explore),
    page!("Careers", "الوظائف", "/careers", ["careers", "jobs", "work", "employment", "hiring", "وظائف"], "Join our team", "انضم لفريقنا", Explore),
    page!("Location", "الموقع", "/location", ["location", "map", "directions", "address", "badr", "موقع"], "How to find us", "كيف تصل إلينا", Explore),
    page!("FAQ", "الأسئلة الشائعة", "/faq", ["faq", "questions", "help", "support", "أسئلة"], "Common questions", "الأسئلة الشائعة", Explore),
    page!("Campus Map", "خريطة الحرم", "/campus-map", ["campus", "map", "3d", "building", "خريطة"], "3D campus overview", "نظرة عامة ثلاثية الأبعاد", Explore),
];

#[rustfmt::skip]
pub static DOCTORS: [DoctorEntry; 8] = [
    DoctorEntry { name: "Dr. Ahmed Hassan", name_ar: "د. أحمد حسن", specialty: "Cardiology", specialty_ar: "أمراض القلب", rating: 4.9 },
    DoctorEntry { name: "Dr. Fatima Al-Sayed", name_ar: "د. فاطمة السيد", specialty: "Neurology", specialty_ar: "الأعصاب", rating: 4.8 },
    DoctorEntry { name: "Dr. Mohamed Khalil", name_ar: "د. محمد خليل", specialty: "Orthopedics", specialty_ar: "العظام", rating: 4.9 },
    DoctorEntry { name: "Dr. Sara Ibrahim", name_ar: "د. سارة إبراهيم", specialty: "Pediatrics", specialty_ar: "طب الأطفال", rating: 4.7 },
    DoctorEntry { name: "Dr. Omar Mahmoud", name_ar: "د. عمر محمود", specialty: "Oncology", specialty_ar: "الأورام", rating: 4.9 },
    DoctorEntry { name: "Dr. Layla Abdel-Rahman", name_ar: "د. ليلى عبد الرحمن", specialty: "Ophthalmology", specialty_ar: "طب العيون", rating: 4.8 },
    DoctorEntry { name: "Dr. Khaled Nasser", name_ar: "د. خالد ناصر", specialty: "Internal Medicine", specialty_ar: "الباطنة", rating: 4.7 },
    DoctorEntry { name: "Dr. Nour El-Din", name_ar: "د. نور الدين", specialty: "Surgery", specialty_ar: "الجراحة", rating: 4.9 },
];

impl PageEntry {
    pub fn search_text(&self) -> String {
        format!(
            "{} {} {} {} {}",
            self.title,
            self.title_ar,
            self.keywords.join(" "),
            self.description,
            self.description_ar
        )
    }
}

impl DoctorEntry {
    pub fn search_text(&self) -> String {
        format!(
            "{} {} {} {} doctor طبيب",
            self.name, self.name_ar, self.specialty, self.specialty_ar
        )
    }
}

/// Relevance of `value` for `query`, in `[0, 1]`.
pub fn score(value: &str, query: &str) -> f32 {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return 1.0;
    }
    let value = value.to_lowercase();
    if value.starts_with(&query) {
        return 1.0;
    }
    if value.contains(&query) {
        return 0.8;
    }
    let words: Vec<&str> = query.split_whitespace().collect();
    let matched = words.iter().filter(|w| value.contains(**w)).count();
    if matched > 0 {
        0.5 * matched as f32 / words.len() as f32
    } else {
        0.0
    }
}

/// What a search hit points at.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HitKind {
    Page { group: PageGroup },
    Doctor { rating: f32 },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SearchHit {
    pub title: &'static str,
    pub title_ar: &'static str,
    pub href: &'static str,
    pub kind: HitKind,
    pub score: f32,
}

/// Score every page and doctor against `query`, best first.
pub fn search(query: &str) -> Vec<SearchHit> {
    let pages = PAGES.iter().map(|p| SearchHit {
        title: p.title,
        title_ar: p.title_ar,
        href: p.href,
        kind: HitKind::Page { group: p.group },
        score: score(&p.search_text(), query),
    });
    let doctors = DOCTORS.iter().map(|d| SearchHit {
        title: d.name,
        title_ar: d.name_ar,
        href: DOCTORS_HREF,
        kind: HitKind::Doctor { rating: d.rating },
        score: score(&d.search_text(), query),
    });
    let mut hits: Vec<SearchHit> = pages.chain(doctors).filter(|h| h.score > 0.0).collect();
    // Stable: equal scores keep index order.
    hits.sort_by(|a, b| b.score.total_cmp(&a.score));
    hits
}

/// Link for a recent search term: the page or doctor whose English or
/// Arabic title equals `term` exactly, else the home page.
pub fn resolve_recent(term: &str) -> &'static str {
    PAGES
        .iter()
        .find(|p| p.title == term || p.title_ar == term)
        .map(|p| p.href)
        .or_else(|| {
            DOCTORS
                .iter()
                .any(|d| d.name == term || d.name_ar == term)
                .then_some(DOCTORS_HREF)
        })
        .unwrap_or(HOME_HREF)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_tiers() {
        assert_eq!(score("Cardiology", ""), 1.0);
        assert_eq!(score("Cardiology", "   "), 1.0);
        assert_eq!(score("Cardiology", "card"), 1.0);
        assert_eq!(score("Cardiology", "CARD"), 1.0);
        assert_eq!(score("Cardiology", "logy"), 0.8);
        assert_eq!(score("heart and lungs", "lungs heart"), 0.5);
        assert_eq!(score("heart and lungs", "lungs brain"), 0.25);
        assert_eq!(score("Cardiology", "xyz"), 0.0);
    }

    #[test]
    fn index_sizes() {
        assert_eq!(PAGES.len(), 17);
        assert_eq!(DOCTORS.len(), 8);
        assert_eq!(PAGES.iter().filter(|p| p.group == PageGroup::Main).count(), 5);
    }

    #[test]
    fn search_ranks_prefix_matches_first() {
        let hits = search("campus");
        assert_eq!(hits[0].href, "/campus-map");
        assert!(hits.iter().any(|h| h.href == "/facilities"));
        assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn search_finds_doctors_by_specialty() {
        let hits = search("cardiology");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Dr. Ahmed Hassan");
        assert_eq!(hits[0].href, DOCTORS_HREF);
        assert_eq!(hits[0].score, 0.8);
    }

    #[test]
    fn search_matches_arabic() {
        let hits = search("طبيب");
        // "Find a Doctor" plus every doctor entry.
        assert_eq!(hits.len(), 1 + DOCTORS.len());
        assert_eq!(hits[0].href, "/doctors");
    }

    #[test]
    fn empty_query_lists_everything_in_order() {
        let hits = search("");
        assert_eq!(hits.len(), PAGES.len() + DOCTORS.len());
        assert_eq!(hits[0].title, "Home");
        assert_eq!(hits[PAGES.len()].title, "Dr. Ahmed Hassan");
    }

    #[test]
    fn no_match_is_empty() {
        assert!(search("zzzz").is_empty());
    }

    #[test]
    fn recent_terms_resolve() {
        assert_eq!(resolve_recent("Research"), "/research");
        assert_eq!(resolve_recent("الأبحاث"), "/research");
        assert_eq!(resolve_recent("Dr. Sara Ibrahim"), DOCTORS_HREF);
        assert_eq!(resolve_recent("research"), HOME_HREF);
        assert_eq!(resolve_recent("Cardiology"), HOME_HREF);
    }
}
