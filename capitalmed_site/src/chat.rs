// Rule-based help-desk chat.
//
// `respond` maps a visitor message to one of six canned answers by keyword,
// checked in a fixed order (appointments, doctors, visiting hours,
// emergencies, insurance, then a catch-all). Keywords are matched as
// substrings of the lowercased message, in both English and Arabic; the reply
// language is the session language, not the language of the message.
//
// `ChatSession` adds the widget behaviour around it: the greeting on first
// open, and a simulated "typing" delay before each reply. Pending replies sit
// in a `TimerQueue` on the caller's millisecond clock and are delivered by
// `poll`. The reply text is fixed when the message is sent, so switching
// language while a reply is pending does not change it.
//
// See also: `capitalmed_sim::schedule::TimerQueue`.

use capitalmed_sim::schedule::TimerQueue;
use serde::{Deserialize, Serialize};

/// Minimum simulated typing delay.
pub const TYPING_BASE_MS: u64 = 800;
/// Range of the random part of the typing delay.
pub const TYPING_JITTER_MS: f64 = 600.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ar,
}

impl Language {
    fn pick(self, en: &'static str, ar: &'static str) -> &'static str {
        match self {
            Language::En => en,
            Language::Ar => ar,
        }
    }
}

/// Which canned answer a message gets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Appointment,
    Doctor,
    Visiting,
    Emergency,
    Insurance,
    Default,
}

// Checked in order; the first topic with a matching keyword wins.
const TOPIC_KEYWORDS: [(Topic, &[&str]); 5] = [
    (Topic::Appointment, &["appointment", "book", "موعد", "حجز"]),
    (Topic::Doctor, &["doctor", "specialist", "طبيب"]),
    (Topic::Visiting, &["visit", "hour", "زيارة", "ساعات"]),
    (Topic::Emergency, &["emergency", "urgent", "طوارئ"]),
    (Topic::Insurance, &["insurance", "billing", "تأمين"]),
];

/// Classify a visitor message.
pub fn classify(text: &str) -> Topic {
    let lower = text.to_lowercase();
    TOPIC_KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|w| lower.contains(w)))
        .map_or(Topic::Default, |&(topic, _)| topic)
}

impl Topic {
    pub fn response(self, lang: Language) -> &'static str {
        match self {
            Topic::Appointment => lang.pick(
                "I'd be happy to help you book an appointment! You can call us at +20 2 1234 5678 or visit our Doctors page to browse specialists and book online.",
                "يسعدني مساعدتك في حجز موعد! يمكنك الاتصال بنا على +20 2 1234 5678 أو زيارة صفحة الأطباء لتصفح المتخصصين والحجز عبر الإنترنت.",
            ),
            Topic::Doctor => lang.pick(
                "We have 100+ medical specialties. Visit our Find a Doctor page to search by specialty, name, or condition. Would you like me to guide you?",
                "لدينا أكثر من ١٠٠ تخصص طبي. زر صفحة ابحث عن طبيب للبحث حسب التخصص أو الاسم أو الحالة. هل تريدني أن أرشدك؟",
            ),
            Topic::Visiting => lang.pick(
                "General visiting hours: Sunday–Thursday 9AM–9PM, Friday–Saturday 10AM–6PM. ICU visits are limited to specific times. Emergency services are 24/7.",
                "ساعات الزيارة العامة: الأحد–الخميس ٩ صباحاً–٩ مساءً، الجمعة–السبت ١٠ صباحاً–٦ مساءً. زيارات العناية المركزة محدودة بأوقات معينة. خدمات الطوارئ ٢٤/٧.",
            ),
            Topic::Emergency => lang.pick(
                "🚨 For emergencies, call 123 immediately or come to our Emergency Department (Ground Floor, Building 1). We operate 24/7 with Level I Trauma Center capabilities.",
                "🚨 للطوارئ، اتصل بـ ١٢٣ فوراً أو توجه إلى قسم الطوارئ (الطابق الأرضي، المبنى ١). نعمل على مدار الساعة مع إمكانيات مركز إصابات المستوى الأول.",
            ),
            Topic::Insurance => lang.pick(
                "We accept 50+ insurance providers including AXA, Bupa, MetLife, and Allianz. Visit our Insurance page to check if your provider is in our network.",
                "نقبل أكثر من ٥٠ مزود تأمين بما في ذلك أكسا وبوبا وميتلايف وأليانز. زر صفحة التأمين للتحقق مما إذا كان مزودك ضمن شبكتنا.",
            ),
            Topic::Default => lang.pick(
                "Thank you for reaching out! I can help with appointments, finding doctors, visiting hours, emergency info, and insurance. What would you like to know?",
                "شكراً لتواصلك! يمكنني المساعدة في المواعيد والبحث عن أطباء وساعات الزيارة ومعلومات الطوارئ والتأمين. ماذا تريد أن تعرف؟",
            ),
        }
    }
}

/// Canned reply to `text` in `lang`.
pub fn respond(text: &str, lang: Language) -> &'static str {
    classify(text).response(lang)
}

pub fn greeting(lang: Language) -> &'static str {
    lang.pick(
        "Hello! 👋 I'm CapitalMed's virtual assistant. How can I help you today?",
        "مرحباً! 👋 أنا مساعد كابيتال ميد. كيف يمكنني مساعدتك اليوم؟",
    )
}

pub fn quick_replies(lang: Language) -> [&'static str; 5] {
    match lang {
        Language::En => [
            "Book Appointment",
            "Find a Doctor",
            "Visiting Hours",
            "Emergency",
            "Insurance",
        ],
        Language::Ar => [
            "حجز موعد",
            "ابحث عن طبيب",
            "ساعات الزيارة",
            "الطوارئ",
            "التأمين",
        ],
    }
}

/// Typing delay for a uniform `jitter` in `[0, 1)`. Out-of-range jitter is
/// clamped.
pub fn typing_delay_ms(jitter: f64) -> u64 {
    let j = if jitter.is_finite() {
        jitter.clamp(0.0, 1.0 - f64::EPSILON)
    } else {
        0.0
    };
    TYPING_BASE_MS + (j * TYPING_JITTER_MS) as u64
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    Bot,
    User,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: u64,
    pub sender: Sender,
    pub text: String,
}

/// Transcript plus pending bot replies.
#[derive(Default)]
pub struct ChatSession {
    language: Language,
    messages: Vec<ChatMessage>,
    pending: TimerQueue<String>,
    next_id: u64,
}

impl ChatSession {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// A reply is scheduled but not yet delivered.
    pub fn is_typing(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Quick replies are offered until the conversation gets going.
    pub fn shows_quick_replies(&self) -> bool {
        self.messages.len() <= 2
    }

    /// Open the widget. Posts the greeting if the transcript is empty.
    pub fn open(&mut self) {
        if self.messages.is_empty() {
            let text = greeting(self.language).to_owned();
            self.push(Sender::Bot, text);
        }
    }

    /// Post a visitor message and schedule the reply. Blank input is ignored.
    /// Returns whether a message was posted.
    pub fn send(&mut self, text: &str, now_ms: u64, jitter: f64) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        let reply = respond(text, self.language).to_owned();
        let due = now_ms + typing_delay_ms(jitter);
        log::debug!("chat: reply to {text:?} due at {due}ms");
        self.push(Sender::User, text.to_owned());
        self.pending.schedule(due, reply);
        true
    }

    /// Deliver every reply due by `now_ms`. Returns how many were delivered.
    pub fn poll(&mut self, now_ms: u64) -> usize {
        let due = self.pending.drain_due(now_ms);
        let n = due.len();
        for reply in due {
            self.push(Sender::Bot, reply);
        }
        n
    }

    fn push(&mut self, sender: Sender, text: String) {
        self.next_id += 1;
        self.messages.push(ChatMessage {
            id: self.next_id,
            sender,
            text,
        });
    }
}
