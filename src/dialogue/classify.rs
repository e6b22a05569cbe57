//! Keyword intent classifier
//!
//! Each menu state owns an ordered `(keyword, intent)` table. Input is
//! lowercased and the first keyword it contains decides the intent, so a
//! phrase matching several keywords resolves by table order.

use super::script::{Channel, FaqTopic, Service};
use super::state::ConversationState;
use serde::Serialize;

/// What the visitor meant, as far as the current menu can tell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    // Main menu
    Services,
    Contact,
    Faq,
    Schedule,
    Blog,
    Feedback,
    End,
    // Interest menu
    ServiceWebsite,
    ServiceChatbot,
    ServiceEcommerce,
    ServiceHosting,
    // Contact menu (WhatsApp is also the final question's "talk now")
    ContactWhatsApp,
    ContactEmail,
    ContactPhone,
    ContactLinkedIn,
    ContactInstagram,
    // FAQ menu
    FaqCost,
    FaqDeadline,
    FaqMaintenance,
    FaqPayment,
    // Final question
    Affirm,
    Deny,
    BackToMenu,
    Unrecognized,
}

impl Intent {
    pub fn service(self) -> Option<Service> {
        match self {
            Intent::ServiceWebsite => Some(Service::Website),
            Intent::ServiceChatbot => Some(Service::Chatbot),
            Intent::ServiceEcommerce => Some(Service::Ecommerce),
            Intent::ServiceHosting => Some(Service::Hosting),
            _ => None,
        }
    }

    pub fn channel(self) -> Option<Channel> {
        match self {
            Intent::ContactWhatsApp => Some(Channel::WhatsApp),
            Intent::ContactEmail => Some(Channel::Email),
            Intent::ContactPhone => Some(Channel::Phone),
            Intent::ContactLinkedIn => Some(Channel::LinkedIn),
            Intent::ContactInstagram => Some(Channel::Instagram),
            _ => None,
        }
    }

    pub fn faq_topic(self) -> Option<FaqTopic> {
        match self {
            Intent::FaqCost => Some(FaqTopic::Cost),
            Intent::FaqDeadline => Some(FaqTopic::Deadline),
            Intent::FaqMaintenance => Some(FaqTopic::Maintenance),
            Intent::FaqPayment => Some(FaqTopic::Payment),
            _ => None,
        }
    }
}

type KeywordTable = &'static [(&'static str, Intent)];

const MAIN_MENU_KEYWORDS: KeywordTable = &[
    ("serviços", Intent::Services),
    ("contato", Intent::Contact),
    ("perguntas frequentes", Intent::Faq),
    ("faq", Intent::Faq),
    ("agendar reuniã", Intent::Schedule),
    ("reunião", Intent::Schedule),
    ("chamada", Intent::Schedule),
    ("blog", Intent::Blog),
    ("conteúdo", Intent::Blog),
    ("feedback", Intent::Feedback),
    ("sugestão", Intent::Feedback),
    ("encerrar", Intent::End),
    ("finalizar", Intent::End),
    ("sair", Intent::End),
];

const INTEREST_KEYWORDS: KeywordTable = &[
    ("web", Intent::ServiceWebsite),
    ("site", Intent::ServiceWebsite),
    ("chatbot", Intent::ServiceChatbot),
    ("e-com", Intent::ServiceEcommerce),
    ("loja", Intent::ServiceEcommerce),
    ("hosped", Intent::ServiceHosting),
    ("voltar ao menu principal", Intent::BackToMenu),
];

// "voltar ao menu principal" ends the conversation here rather than
// returning to the menu.
const FINAL_QUESTION_KEYWORDS: KeywordTable = &[
    ("whatsapp", Intent::ContactWhatsApp),
    ("falar", Intent::ContactWhatsApp),
    ("sim", Intent::Affirm),
    ("quero", Intent::Affirm),
    ("não", Intent::Deny),
    ("obrigado", Intent::Deny),
    ("voltar ao menu principal", Intent::Deny),
];

const CONTACT_KEYWORDS: KeywordTable = &[
    ("whatsapp", Intent::ContactWhatsApp),
    ("e-mail", Intent::ContactEmail),
    ("email", Intent::ContactEmail),
    ("telefone", Intent::ContactPhone),
    ("linkedin", Intent::ContactLinkedIn),
    ("instagram", Intent::ContactInstagram),
    ("voltar ao menu principal", Intent::BackToMenu),
];

const FAQ_KEYWORDS: KeywordTable = &[
    ("quanto custa", Intent::FaqCost),
    ("custo", Intent::FaqCost),
    ("prazo de entrega", Intent::FaqDeadline),
    ("prazo", Intent::FaqDeadline),
    ("manutenção", Intent::FaqMaintenance),
    ("formas de pagamento", Intent::FaqPayment),
    ("pagamento", Intent::FaqPayment),
    ("voltar ao menu principal", Intent::BackToMenu),
];

/// Keyword table consulted in `state`, if the state reads menu choices
pub fn keywords_for(state: ConversationState) -> Option<KeywordTable> {
    match state {
        ConversationState::MainMenu => Some(MAIN_MENU_KEYWORDS),
        ConversationState::AwaitingInterest => Some(INTEREST_KEYWORDS),
        ConversationState::FinalQuestion | ConversationState::Blog => {
            Some(FINAL_QUESTION_KEYWORDS)
        }
        ConversationState::ContactOptions => Some(CONTACT_KEYWORDS),
        ConversationState::FaqMenu => Some(FAQ_KEYWORDS),
        ConversationState::AwaitingName
        | ConversationState::Feedback
        | ConversationState::Inactive
        | ConversationState::Ended => None,
    }
}

/// Classify `text` against a keyword table
pub fn match_keywords(table: &[(&str, Intent)], text: &str) -> Intent {
    let lowered = text.to_lowercase();
    table
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map_or(Intent::Unrecognized, |(_, intent)| *intent)
}

/// Classify `text` with the table of the given state
///
/// States that do not read menu choices always yield `Unrecognized`.
pub fn classify(state: ConversationState, text: &str) -> Intent {
    keywords_for(state).map_or(Intent::Unrecognized, |table| match_keywords(table, text))
}
