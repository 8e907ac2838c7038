// src/content.rs
// Static placeholder content and the view documents built from it. Every
// page of the portal is a `PageView`: a title plus typed sections. Nothing
// here is persisted or searchable.

use serde::Serialize;

use crate::services::chat_log::ChatMessage;
use crate::services::session_store::{Identity, MemberCategory};

pub const ORG_NAME: &str = "தமிழ் வணிகர் பேரவை";

#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub route: &'static str,
    pub title: String,
    pub sections: Vec<Section>,
}

impl PageView {
    fn new(route: &'static str, title: impl Into<String>, sections: Vec<Section>) -> Self {
        Self { route, title: title.into(), sections }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Section {
    Hero { heading: &'static str, tagline: &'static str, actions: Vec<Link> },
    Text { heading: Option<&'static str>, body: &'static str },
    Cards { heading: Option<&'static str>, cards: Vec<Card> },
    Notices { heading: &'static str, items: Vec<&'static str> },
    Products { items: Vec<Product> },
    Workshops { heading: &'static str, items: Vec<Workshop> },
    News { heading: &'static str, items: Vec<NewsItem> },
    LoginTabs { tabs: Vec<LoginTab>, register_link: &'static str },
    Form { heading: String, fields: Vec<FormField>, consent: &'static str, submit: &'static str },
    Chat { messages: Vec<ChatMessage>, placeholder: &'static str, submit: &'static str },
}

#[derive(Debug, Clone, Serialize)]
pub struct Link {
    pub label: &'static str,
    pub to: String,
}

fn link(label: &'static str, to: &str) -> Link {
    Link { label, to: to.to_string() }
}

#[derive(Debug, Clone, Serialize)]
pub struct Card {
    pub title: String,
    pub subtitle: Option<&'static str>,
    pub body: Option<&'static str>,
    pub image: Option<String>,
    pub link: Option<Link>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewsItem {
    pub id: &'static str,
    pub title: &'static str,
    pub date: &'static str,
    pub content: &'static str,
    pub image: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Workshop {
    pub id: &'static str,
    pub title: &'static str,
    pub instructor: &'static str,
    pub date: &'static str,
    pub location: &'static str,
    pub fee: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub id: String,
    pub name: &'static str,
    pub company: &'static str,
    pub price: &'static str,
    pub description: &'static str,
    pub image: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginTab {
    pub id: &'static str,
    pub category: MemberCategory,
    pub label: &'static str,
    pub description: &'static str,
    pub blurb: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub input: &'static str,
    pub required: bool,
}

fn field(name: &'static str, label: &'static str, input: &'static str, required: bool) -> FormField {
    FormField { name, label, input, required }
}

pub fn login_tab(category: MemberCategory) -> Option<LoginTab> {
    let (label, description, blurb) = match category {
        MemberCategory::Unregistered => (
            "பதிவு செய்யாதவர்",
            "தனிநபர் / Start-up",
            "பொது உறுப்பினர், பதிவு செய்யாத ஸ்டார்ட்-அப், உள்ளூர் பங்கேற்பாளர் ஆகியோருக்கான நுழைவு.",
        ),
        MemberCategory::Registered => (
            "பதிவு பெற்றவர்",
            "நிறுவன உறுப்பினர்",
            "பதிவு செய்யப்பட்ட பொது உறுப்பினர், அசோசியேட் உறுப்பினர் மற்றும் நிறுவனங்களுக்கான நுழைவு.",
        ),
        MemberCategory::Assistant => (
            "உதவியாளர்",
            "Business Assistant",
            "உள்நாட்டு மற்றும் வெளிநாட்டு வணிக உதவியாளர்களுக்கான பிரத்யேக நுழைவு.",
        ),
        MemberCategory::Guest => return None,
    };
    Some(LoginTab { id: category.tab_id(), category, label, description, blurb })
}

pub fn home() -> PageView {
    PageView::new(
        "/",
        ORG_NAME,
        vec![
            Section::Hero {
                heading: ORG_NAME,
                tagline: "தமிழர் வணிகம் தழைத்தோங்க, உலகமெங்கும் எம் புகழ் பரவ, ஒன்றிணைவோம்.",
                actions: vec![
                    link("இப்போதே இணையுங்கள்", "/login"),
                    link("வரலாறு அறிவோம்", "/history-commerce"),
                ],
            },
            Section::Cards {
                heading: Some("எங்கள் சேவைகள்"),
                cards: vec![
                    Card {
                        title: "வணிகத் தொடர்பு".into(),
                        subtitle: None,
                        body: Some("உலகளாவிய தமிழ் வணிகர்களுடன் தொடர்பு கொள்ள சிறந்த தளம்."),
                        image: None,
                        link: Some(link("தொடர்பு", "/connect")),
                    },
                    Card {
                        title: "தொழில் வழிகாட்டுதல்".into(),
                        subtitle: None,
                        body: Some("அனுபவம் வாய்ந்த வணிகர்களிடமிருந்து ஆலோசனைகள் மற்றும் பயிற்சிகள்."),
                        image: None,
                        link: Some(link("கேள்வி பதில்", "/qa")),
                    },
                    Card {
                        title: "வணிகச் செய்திகள்".into(),
                        subtitle: None,
                        body: Some("சமீபத்திய வணிக மற்றும் வரி விதிமுறைகள் பற்றிய தகவல்கள்."),
                        image: None,
                        link: Some(link("செய்திகள்", "/news")),
                    },
                ],
            },
        ],
    )
}

pub fn login() -> PageView {
    PageView::new(
        "/login",
        "உறுப்பினர் நுழைவு",
        vec![
            Section::Text {
                heading: Some("வணக்கம்!"),
                body: "தமிழ் வணிகர் பேரவையில் இணைய உங்கள் கணக்கில் நுழையவும்.",
            },
            Section::LoginTabs {
                tabs: MemberCategory::MEMBERS.into_iter().filter_map(login_tab).collect(),
                register_link: "/register",
            },
        ],
    )
}

/// Registration form for a login tab. Unknown tabs fall back to `type1`.
pub fn register(tab: Option<&str>) -> PageView {
    let category = tab
        .and_then(MemberCategory::from_tab_id)
        .unwrap_or(MemberCategory::Unregistered);

    let heading = if category == MemberCategory::Unregistered {
        "பதிவு செய்யாத தனிநபர் பதிவு"
    } else {
        "நிறுவன / உதவியாளர் பதிவு"
    };

    let mut fields = vec![
        field("name", "பெயர் (Name)", "text", true),
        field("phone", "தொலைபேசி எண்", "tel", true),
        field("email", "மின்னஞ்சல்", "email", true),
    ];
    if category != MemberCategory::Unregistered {
        fields.push(field("company", "நிறுவனத்தின் பெயர்", "text", false));
    }
    fields.push(field("city", "ஊர் / நகரம்", "text", true));
    if category == MemberCategory::Assistant {
        fields.push(field("specialty", "சிறப்புத் துறை", "text", false));
    }
    fields.push(field("photo", "புகைப்படம் பதிவேற்றம் (Photo Upload)", "file", true));
    fields.push(field("id_proof", "ஆதார் / அடையாள அட்டை (ID Proof)", "file", true));

    PageView::new(
        "/register",
        heading,
        vec![Section::Form {
            heading: format!("{heading} ({})", category.tab_id()),
            fields,
            consent: "நான் தமிழ் வணிகர் பேரவையின் விதிமுறைகள் மற்றும் நிபந்தனைகளை படித்து புரிந்து கொண்டேன். நான் அளித்துள்ள தகவல்கள் அனைத்தும் உண்மையானவை என்று உறுதி கூறுகிறேன். (I agree to the Terms and Conditions).",
            submit: "பதிவு செய்",
        }],
    )
}

pub const REGISTER_ACK: &str =
    "பதிவு கோரிக்கை வெற்றிகரமாக அனுப்பப்பட்டது! நிர்வாகி ஒப்புதலுக்குப் பிறகு மின்னஞ்சல் அனுப்பப்படும்.";

pub fn history_commerce() -> PageView {
    PageView::new(
        "/history-commerce",
        "தமிழ் வணிக வரலாறு",
        vec![
            Section::Text {
                heading: None,
                body: "\"திரைகடல் ஓடியும் திரவியம் தேடு\" என்ற முதுமொழி தமிழர்களின் வணிகப் பாரம்பரியத்திற்கு சான்று. சங்க காலம் தொட்டே தமிழர்கள் ரோமானியர்கள், சீனர்கள் மற்றும் தென்கிழக்கு ஆசிய நாடுகளுடன் வணிகம் செய்து வந்துள்ளனர்.",
            },
            Section::Text {
                heading: Some("சங்க கால வணிகம்"),
                body: "பூம்புகார், முசிறி, கொற்கை போன்ற துறைமுக நகரங்கள் உலகப் புகழ் பெற்றவை. மிளகு, முத்து, தந்தம், மற்றும் நறுமணப் பொருட்கள் இங்கிருந்து ஏற்றுமதி செய்யப்பட்டன.",
            },
            Section::Text {
                heading: Some("வணிகச் சாத்துக்கள்"),
                body: "வணிகர்கள் கூட்டாக பயணம் செய்யும் முறை 'சாத்து' எனப்பட்டது. ஐநூற்றுவர், நானாதேசிகள் போன்ற வணிகக் குழுக்கள் கடல் கடந்து வணிகம் செய்தனர்.",
            },
        ],
    )
}

pub fn connect() -> PageView {
    let cards = (1..=6)
        .map(|i| Card {
            title: format!("வணிகர் பெயர் {i}"),
            subtitle: Some("ஜவுளி ஏற்றுமதி"),
            body: Some("சென்னை, தமிழ்நாடு"),
            image: Some(format!("https://picsum.photos/300/200?random={i}")),
            link: None,
        })
        .collect();
    PageView::new(
        "/connect",
        "வணிகத் தொடர்பு (Connect)",
        vec![Section::Cards { heading: None, cards }],
    )
}

pub fn qa(messages: Vec<ChatMessage>) -> PageView {
    PageView::new(
        "/qa",
        "கேள்வி பதில் (AI Assistant)",
        vec![Section::Chat {
            messages,
            placeholder: "உங்கள் கேள்வியைத் தமிழில் கேட்கவும்...",
            submit: "அனுப்பு",
        }],
    )
}

pub fn dashboard(identity: &Identity) -> PageView {
    let tile = |title: &str, body: &'static str, to: &str| Card {
        title: title.to_string(),
        subtitle: None,
        body: Some(body),
        image: None,
        link: Some(link("திற", to)),
    };
    PageView::new(
        "/dashboard",
        format!("வணக்கம், {}", identity.name),
        vec![
            Section::Cards {
                heading: None,
                cards: vec![
                    tile("விளம்பரங்கள்", "உங்கள் தயாரிப்புகளை விளம்பரப்படுத்த", "/ads"),
                    tile("பொருட்கள்", "நிறுவனத்தின் தயாரிப்புகள்", "/products"),
                    tile("பயிற்சி வகுப்புகள்", "Workshops & Tutorials", "/workshops"),
                    tile("செய்திகள்", "வணிக உலகம்", "/news"),
                ],
            },
            Section::Notices {
                heading: "சமீபத்திய அறிவிப்புகள்",
                items: vec![
                    "அடுத்த வாராந்திர கூட்டம் திங்கள் அன்று நடைபெறும்.",
                    "புதிய ஏற்றுமதி விதிமுறைகள் பற்றிய கருத்தரங்கு.",
                ],
            },
        ],
    )
}

pub fn ads() -> PageView {
    PageView::new(
        "/ads",
        "விளம்பர மேலாண்மை",
        vec![
            Section::Text {
                heading: Some("உங்கள் விளம்பரங்கள்"),
                body: "நீங்கள் இதுவரை எந்த விளம்பரமும் பதிவிடவில்லை.",
            },
            Section::Cards {
                heading: Some("பரிந்துரைகள்"),
                cards: vec![
                    Card {
                        title: "தீபாவளி சலுகை".into(),
                        subtitle: None,
                        body: Some("சிறப்பு சலுகைகளை இப்போது பதிவிடுங்கள்."),
                        image: None,
                        link: None,
                    },
                    Card {
                        title: "B2B வாய்ப்புகள்".into(),
                        subtitle: None,
                        body: Some("மொத்த வியாபாரிகளுக்கான விளம்பரங்கள்."),
                        image: None,
                        link: None,
                    },
                ],
            },
        ],
    )
}

pub fn products() -> PageView {
    let items = (1..=3)
        .map(|i| Product {
            id: format!("p{i}"),
            name: "கைத்தறி சேலைகள்",
            company: ORG_NAME,
            price: "₹ 2,500",
            description: "தூய பருத்தி மற்றும் பட்டு இழைகளால் நெய்யப்பட்ட பாரம்பரிய சேலைகள்.",
            image: format!("https://picsum.photos/400/300?random={}", i + 10),
        })
        .collect();
    PageView::new("/products", "தயாரிப்புகள் & சேவைகள்", vec![Section::Products { items }])
}

/// Workshops and news share one page; `/news` renders it under its own route.
pub fn workshops(route: &'static str) -> PageView {
    PageView::new(
        route,
        "பயிற்சி வகுப்புகள் & செய்திகள்",
        vec![
            Section::Workshops {
                heading: "வரவிருக்கும் பயிற்சிகள்",
                items: vec![Workshop {
                    id: "w1",
                    title: "டிஜிட்டல் மார்க்கெட்டிங் பயிலரங்கம்",
                    instructor: ORG_NAME,
                    date: "அக் 25, 2023",
                    location: "சென்னை",
                    fee: "₹ 500",
                    description: "உங்கள் தொழிலை இணையத்தில் வளர்ப்பது எப்படி? முழுமையான வழிகாட்டுதல்.",
                }],
            },
            Section::News {
                heading: "வணிகச் செய்திகள்",
                items: vec![
                    NewsItem {
                        id: "n1",
                        title: "ஏற்றுமதி கொள்கையில் மாற்றம்",
                        date: "",
                        content: "மத்திய அரசு ஜவுளித் துறைக்கான புதிய ஏற்றுமதி சலுகைகளை அறிவித்துள்ளது...",
                        image: "",
                    },
                    NewsItem {
                        id: "n2",
                        title: "சிறுகுறு தொழில் கடன் முகாம்",
                        date: "",
                        content: "வரும் ஞாயிறு அன்று கோயம்புத்தூரில் மாபெரும் கடன் மேளா...",
                        image: "",
                    },
                ],
            },
        ],
    )
}
