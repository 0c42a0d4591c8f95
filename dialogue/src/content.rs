//! Localized content tables: recognizers, prompts, menu labels, and
//! informational replies for every supported language.
//!
//! Everything here is a keyed lookup over [`Language`] and [`MenuItem`], so
//! adding a language or a menu entry is a data change, not new control flow.

use std::env;

use gbot_core::Language;

/// Commands that restart the dialogue from any stage, compared
/// case-insensitively against the trimmed input.
const RESET_COMMANDS: [&str; 6] = ["/start", "start", "شروع", "ابدأ", "старт", "начать"];

/// Informational entries served in the terminal menu stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Products,
    Offers,
    Catalogs,
    Delivery,
    Contact,
    Booking,
}

impl MenuItem {
    /// Match priority order; also the order the quick-reply buttons appear in.
    pub const ALL: [MenuItem; 6] = [
        MenuItem::Products,
        MenuItem::Offers,
        MenuItem::Catalogs,
        MenuItem::Delivery,
        MenuItem::Contact,
        MenuItem::Booking,
    ];

    /// Quick-reply button label in the given language.
    pub fn label(&self, lang: Language) -> &'static str {
        match (self, lang) {
            (MenuItem::Products, Language::En) => "Products",
            (MenuItem::Products, Language::Fa) => "محصولات",
            (MenuItem::Products, Language::Ar) => "المنتجات",
            (MenuItem::Products, Language::Ru) => "Продукты",

            (MenuItem::Offers, Language::En) => "Offers & Discounts",
            (MenuItem::Offers, Language::Fa) => "تخفیف‌ها و پیشنهادها",
            (MenuItem::Offers, Language::Ar) => "العروض والخصومات",
            (MenuItem::Offers, Language::Ru) => "Акции и скидки",

            (MenuItem::Catalogs, Language::En) => "Catalogs",
            (MenuItem::Catalogs, Language::Fa) => "کاتالوگ‌ها",
            (MenuItem::Catalogs, Language::Ar) => "الكتالوجات",
            (MenuItem::Catalogs, Language::Ru) => "Каталоги",

            (MenuItem::Delivery, Language::En) => "Delivery Areas & Times",
            (MenuItem::Delivery, Language::Fa) => "مناطق و زمان تحویل",
            (MenuItem::Delivery, Language::Ar) => "مناطق وأوقات التوصيل",
            (MenuItem::Delivery, Language::Ru) => "Зоны и время доставки",

            (MenuItem::Contact, Language::En) => "Contact",
            (MenuItem::Contact, Language::Fa) => "تماس با ما",
            (MenuItem::Contact, Language::Ar) => "اتصل بنا",
            (MenuItem::Contact, Language::Ru) => "Контакты",

            (MenuItem::Booking, Language::En) => "Book Appointment",
            (MenuItem::Booking, Language::Fa) => "رزرو وقت",
            (MenuItem::Booking, Language::Ar) => "حجز موعد",
            (MenuItem::Booking, Language::Ru) => "Записаться на встречу",
        }
    }

    /// Substrings that recognize this entry in free text, per language.
    fn keywords(&self, lang: Language) -> &'static [&'static str] {
        match (self, lang) {
            (MenuItem::Products, Language::En) => &["products"],
            (MenuItem::Products, Language::Fa) => &["محصولات"],
            (MenuItem::Products, Language::Ar) => &["المنتجات", "منتجات"],
            (MenuItem::Products, Language::Ru) => &["продукты", "товары"],

            (MenuItem::Offers, Language::En) => &["offers", "discounts"],
            (MenuItem::Offers, Language::Fa) => &["تخفیف", "پیشنهاد"],
            (MenuItem::Offers, Language::Ar) => &["العروض", "عروض", "خصومات"],
            (MenuItem::Offers, Language::Ru) => &["акции", "скидки"],

            (MenuItem::Catalogs, Language::En) => &["catalog"],
            (MenuItem::Catalogs, Language::Fa) => &["کاتالوگ"],
            (MenuItem::Catalogs, Language::Ar) => &["كتالوج"],
            (MenuItem::Catalogs, Language::Ru) => &["каталог"],

            (MenuItem::Delivery, Language::En) => &["delivery"],
            (MenuItem::Delivery, Language::Fa) => &["تحویل", "ارسال"],
            (MenuItem::Delivery, Language::Ar) => &["التوصيل", "توصيل"],
            (MenuItem::Delivery, Language::Ru) => &["доставк"],

            (MenuItem::Contact, Language::En) => &["contact", "exhibitor"],
            (MenuItem::Contact, Language::Fa) => &["تماس"],
            (MenuItem::Contact, Language::Ar) => &["اتصل", "تواصل"],
            (MenuItem::Contact, Language::Ru) => &["контакт"],

            (MenuItem::Booking, Language::En) => &["book", "appointment"],
            (MenuItem::Booking, Language::Fa) => &["رزرو", "وقت"],
            (MenuItem::Booking, Language::Ar) => &["حجز", "موعد"],
            (MenuItem::Booking, Language::Ru) => &["запис", "встреч"],
        }
    }
}

/// Static content behind the informational menu replies: catalog links,
/// contact card, booking link. Loaded once at startup.
#[derive(Debug, Clone)]
pub struct ContentConfig {
    pub catalog_urls: Vec<String>,
    pub contact_name: String,
    pub contact_phone: String,
    pub contact_email: String,
    pub booking_url: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            catalog_urls: vec![
                "https://amhrd.com/wp-content/uploads/2025/11/JARRED-BOTTLED-Products-Catalog-P-4-compressed.pdf".to_string(),
                "https://amhrd.com/wp-content/uploads/2025/11/SEASONINGS-SPICES-Product-Catalog-P-8-compressed.pdf".to_string(),
                "https://amhrd.com/wp-content/uploads/2025/11/Dry-Goods-Snacks-Products-Catalog-P-1-compressed.pdf".to_string(),
                "https://amhrd.com/wp-content/uploads/2025/11/FROZEN-Products-Catalog-P-1-compressed.pdf".to_string(),
                "https://amhrd.com/wp-content/uploads/2025/11/MEAT-Products-Catalog-P-1-compressed.pdf".to_string(),
                "https://amhrd.com/wp-content/uploads/2025/11/CANNED-Products-Catalog-P-3-compressed.pdf".to_string(),
            ],
            contact_name: "Taranteen Sales".to_string(),
            contact_phone: "+971 50 000 0000".to_string(),
            contact_email: "sales@amhrd.com".to_string(),
            booking_url: "https://amhrd.com/booking".to_string(),
        }
    }
}

impl ContentConfig {
    /// Loads from env (CATALOG_1_URL … CATALOG_6_URL, CONTACT_NAME,
    /// CONTACT_PHONE, CONTACT_EMAIL, BOOKING_URL), keeping the stock value
    /// for anything unset.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        for (i, url) in config.catalog_urls.iter_mut().enumerate() {
            if let Ok(v) = env::var(format!("CATALOG_{}_URL", i + 1)) {
                *url = v;
            }
        }
        if let Ok(v) = env::var("CONTACT_NAME") {
            config.contact_name = v;
        }
        if let Ok(v) = env::var("CONTACT_PHONE") {
            config.contact_phone = v;
        }
        if let Ok(v) = env::var("CONTACT_EMAIL") {
            config.contact_email = v;
        }
        if let Ok(v) = env::var("BOOKING_URL") {
            config.booking_url = v;
        }
        config
    }
}

/// True when the trimmed input is a restart command.
pub fn is_reset(text: &str) -> bool {
    let norm = text.trim().to_lowercase();
    norm.starts_with("/start") || RESET_COMMANDS.iter().any(|cmd| norm == *cmd)
}

/// Matches free text against the language recognizers: first hit in the
/// fixed order en → fa → ar → ru wins, so input naming several languages
/// resolves deterministically.
pub fn match_language(text: &str) -> Option<Language> {
    let norm = text.trim().to_lowercase();
    Language::ALL
        .into_iter()
        .find(|lang| language_keywords(*lang).iter().any(|kw| norm.contains(kw)))
}

fn language_keywords(lang: Language) -> &'static [&'static str] {
    match lang {
        Language::En => &["en", "english"],
        Language::Fa => &["fa", "فارسی", "farsi", "persian"],
        Language::Ar => &["ar", "العربية", "عربي", "arabic"],
        Language::Ru => &["ru", "русский", "russian"],
    }
}

/// Matches free text against the active language's menu entries, first hit
/// in [`MenuItem::ALL`] order.
pub fn match_menu(lang: Language, text: &str) -> Option<MenuItem> {
    let norm = text.trim().to_lowercase();
    MenuItem::ALL
        .into_iter()
        .find(|item| item.keywords(lang).iter().any(|kw| norm.contains(kw)))
}

/// Fixed multilingual greeting shown together with the language options.
pub fn greeting() -> String {
    "Welcome to <b>Taranteen</b> 🛒\n\
     Online grocery and food products.\n\n\
     Choose a language · زبان را انتخاب کنید · اختر اللغة · Выберите язык:"
        .to_string()
}

/// One quick-reply option per supported language, native labels.
pub fn language_options() -> Vec<String> {
    Language::ALL.iter().map(|l| l.label().to_string()).collect()
}

/// Shown when the language selection was not recognized; no language is
/// known yet, so it speaks all of them.
pub fn invalid_language() -> String {
    "Please choose one of the languages below:\n\
     لطفاً یکی از زبان‌های زیر را انتخاب کنید:\n\
     الرجاء اختيار إحدى اللغات أدناه:\n\
     Пожалуйста, выберите один из языков ниже:"
        .to_string()
}

pub fn name_prompt(lang: Language) -> String {
    match lang {
        Language::En => "Great 👋 Please send your name.",
        Language::Fa => "عالی 👋 لطفاً نام خود را ارسال کنید.",
        Language::Ar => "رائع 👋 الرجاء إرسال اسمك.",
        Language::Ru => "Отлично 👋 Пожалуйста, отправьте ваше имя.",
    }
    .to_string()
}

pub fn phone_prompt(lang: Language, name: &str) -> String {
    match lang {
        Language::En => format!(
            "Thanks, <b>{name}</b>! Now send your WhatsApp number so our team can reach you."
        ),
        Language::Fa => format!(
            "ممنون، <b>{name}</b>! حالا شماره واتساپ خود را ارسال کنید تا تیم ما با شما تماس بگیرد."
        ),
        Language::Ar => format!(
            "شكراً، <b>{name}</b>! الآن أرسل رقم الواتساب الخاص بك ليتواصل معك فريقنا."
        ),
        Language::Ru => format!(
            "Спасибо, <b>{name}</b>! Теперь отправьте ваш номер WhatsApp, чтобы наша команда могла связаться с вами."
        ),
    }
}

pub fn registration_complete(lang: Language) -> String {
    match lang {
        Language::En => "You're all set ✅ Our team will contact you soon.",
        Language::Fa => "ثبت‌نام شما کامل شد ✅ تیم ما به‌زودی با شما تماس می‌گیرد.",
        Language::Ar => "اكتمل تسجيلك ✅ سيتواصل معك فريقنا قريباً.",
        Language::Ru => "Регистрация завершена ✅ Наша команда скоро свяжется с вами.",
    }
    .to_string()
}

/// Lead-in shown with the menu option buttons.
pub fn menu_prompt(lang: Language) -> String {
    match lang {
        Language::En => "Please choose an option below:",
        Language::Fa => "از منوی زیر یکی از گزینه‌ها را انتخاب کنید:",
        Language::Ar => "اختر أحد الخيارات من القائمة أدناه:",
        Language::Ru => "Выберите один из пунктов меню:",
    }
    .to_string()
}

/// Menu quick-reply labels in button order.
pub fn menu_options(lang: Language) -> Vec<String> {
    MenuItem::ALL
        .iter()
        .map(|item| item.label(lang).to_string())
        .collect()
}

pub fn menu_fallback(lang: Language) -> String {
    match lang {
        Language::En => "Please choose an option from the menu 🙏",
        Language::Fa => "لطفاً یکی از گزینه‌های منو را انتخاب کنید 🙏",
        Language::Ar => "الرجاء اختيار أحد خيارات القائمة 🙏",
        Language::Ru => "Пожалуйста, выберите пункт меню 🙏",
    }
    .to_string()
}

/// Informational reply body for a recognized menu entry.
pub fn menu_reply(lang: Language, item: MenuItem, config: &ContentConfig) -> String {
    match item {
        MenuItem::Products => products_reply(lang),
        MenuItem::Offers => offers_reply(lang),
        MenuItem::Catalogs => catalogs_reply(lang, config),
        MenuItem::Delivery => delivery_reply(lang),
        MenuItem::Contact => contact_reply(lang, config),
        MenuItem::Booking => booking_reply(lang, config),
    }
}

fn products_reply(lang: Language) -> String {
    match lang {
        Language::En => {
            "Taranteen offers a wide range of grocery items: fresh products, pantry items, \
             drinks and everyday essentials."
        }
        Language::Fa => {
            "در تارانتین می‌توانید انواع مواد غذایی، محصولات تازه، کنسروی، نوشیدنی‌ها \
             و اقلام روزمره خانه را سفارش دهید."
        }
        Language::Ar => {
            "تقدم تارانتين تشكيلة واسعة من المواد الغذائية: منتجات طازجة ومعلبات ومشروبات \
             ومستلزمات يومية."
        }
        Language::Ru => {
            "Taranteen предлагает широкий выбор продуктов: свежие продукты, бакалею, напитки \
             и товары на каждый день."
        }
    }
    .to_string()
}

fn offers_reply(lang: Language) -> String {
    match lang {
        Language::En => {
            "This week's offers:\n\n\
             • Discounts on popular household items\n\
             • Family bundle packs\n\
             • Special offers for restaurants and cafés"
        }
        Language::Fa => {
            "پیشنهادهای این هفته:\n\n\
             • تخفیف روی اقلام پرمصرف\n\
             • بسته‌های ترکیبی ویژه خانواده\n\
             • پیشنهاد ویژه رستوران‌ها و کافه‌ها"
        }
        Language::Ar => {
            "عروض هذا الأسبوع:\n\n\
             • خصومات على الأصناف الأكثر طلباً\n\
             • باقات عائلية مميزة\n\
             • عروض خاصة للمطاعم والمقاهي"
        }
        Language::Ru => {
            "Предложения этой недели:\n\n\
             • Скидки на популярные товары\n\
             • Семейные наборы\n\
             • Специальные условия для ресторанов и кафе"
        }
    }
    .to_string()
}

fn catalogs_reply(lang: Language, config: &ContentConfig) -> String {
    let (header, item_label) = match lang {
        Language::En => ("Here are Taranteen catalogs:", "Catalog"),
        Language::Fa => ("کاتالوگ‌های تارانتین:", "کاتالوگ"),
        Language::Ar => ("كتالوجات تارانتين:", "كتالوج"),
        Language::Ru => ("Каталоги Taranteen:", "Каталог"),
    };

    let mut lines = vec![header.to_string(), String::new()];
    for (i, url) in config.catalog_urls.iter().enumerate() {
        let n = ordinal(lang, i + 1);
        lines.push(format!("{n}) <a href=\"{url}\">{item_label} {n}</a>"));
    }
    lines.join("\n")
}

/// Persian replies number their lists with Persian digits, everyone else
/// with Western ones.
fn ordinal(lang: Language, n: usize) -> String {
    match lang {
        Language::Fa => n
            .to_string()
            .chars()
            .map(|c| match c {
                '0' => '۰',
                '1' => '۱',
                '2' => '۲',
                '3' => '۳',
                '4' => '۴',
                '5' => '۵',
                '6' => '۶',
                '7' => '۷',
                '8' => '۸',
                '9' => '۹',
                other => other,
            })
            .collect(),
        _ => n.to_string(),
    }
}

fn delivery_reply(lang: Language) -> String {
    match lang {
        Language::En => {
            "Delivery information:\n\n\
             • Delivery across defined areas in Dubai\n\
             • Time slots: morning / afternoon / evening\n\
             • Special arrangements for restaurants and shops"
        }
        Language::Fa => {
            "اطلاعات تحویل:\n\n\
             • ارسال در مناطق مشخص‌شده در دبی\n\
             • بازه‌های زمانی: صبح / بعدازظهر / شب\n\
             • امکان هماهنگی ویژه برای رستوران‌ها و فروشگاه‌ها"
        }
        Language::Ar => {
            "معلومات التوصيل:\n\n\
             • التوصيل داخل مناطق محددة في دبي\n\
             • فترات التوصيل: صباحاً / ظهراً / مساءً\n\
             • ترتيبات خاصة للمطاعم والمحلات"
        }
        Language::Ru => {
            "Информация о доставке:\n\n\
             • Доставка по определённым районам Дубая\n\
             • Интервалы: утро / день / вечер\n\
             • Особые условия для ресторанов и магазинов"
        }
    }
    .to_string()
}

fn contact_reply(lang: Language, config: &ContentConfig) -> String {
    let lead_in = match lang {
        Language::En => "You can reach our team directly:",
        Language::Fa => "می‌توانید مستقیماً با تیم ما در تماس باشید:",
        Language::Ar => "يمكنكم التواصل مع فريقنا مباشرة:",
        Language::Ru => "Вы можете связаться с нашей командой напрямую:",
    };
    format!(
        "{lead_in}\n\n<b>{}</b>\n📞 {}\n✉️ {}",
        config.contact_name, config.contact_phone, config.contact_email
    )
}

fn booking_reply(lang: Language, config: &ContentConfig) -> String {
    let (lead_in, link_label) = match lang {
        Language::En => ("Book a meeting with our team:", "Booking page"),
        Language::Fa => ("برای رزرو جلسه با تیم ما:", "صفحه رزرو"),
        Language::Ar => ("لحجز موعد مع فريقنا:", "صفحة الحجز"),
        Language::Ru => ("Записаться на встречу с нашей командой:", "Страница записи"),
    };
    format!("{lead_in}\n<a href=\"{}\">{link_label}</a>", config.booking_url)
}
