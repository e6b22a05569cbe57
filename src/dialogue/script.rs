//! Static copy, menus, and outbound links
//!
//! Everything the assistant says lives here so the transition table reads
//! as pure routing.

use super::effect::{Effect, Pacing};
use serde::{Deserialize, Serialize};

pub const BACK_TO_MENU: &str = "Voltar ao menu principal";

pub const MAIN_MENU: [&str; 7] = [
    "Serviços",
    "Contato",
    "Perguntas Frequentes (FAQ)",
    "Agendar Reunião",
    "Blog",
    "Deixar um Feedback",
    "Encerrar Conversa",
];

pub const INTEREST_OPTIONS: [&str; 5] =
    ["Website", "Chatbot", "e-Commerce", "Hospedagem", BACK_TO_MENU];

pub const CONTACT_OPTIONS: [&str; 6] = [
    "WhatsApp",
    "E-mail",
    "Telefone",
    "LinkedIn",
    "Instagram",
    BACK_TO_MENU,
];

pub const FAQ_OPTIONS: [&str; 5] = [
    "Quanto custa um site?",
    "Qual o prazo de entrega?",
    "Vocês fazem manutenção?",
    "Formas de pagamento?",
    BACK_TO_MENU,
];

pub const YES_NO: [&str; 2] = ["Sim", "Não"];
pub const FAQ_FOLLOW_UP: [&str; 3] = ["Sim", "Não", BACK_TO_MENU];
pub const SERVICE_FOLLOW_UP: [&str; 2] = ["Falar no WhatsApp", BACK_TO_MENU];

/// Which buttons accompanied the last final question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FollowUp {
    #[default]
    YesNo,
    Faq,
    Service,
}

impl FollowUp {
    pub fn options(self) -> &'static [&'static str] {
        match self {
            FollowUp::YesNo => &YES_NO,
            FollowUp::Faq => &FAQ_FOLLOW_UP,
            FollowUp::Service => &SERVICE_FOLLOW_UP,
        }
    }
}

pub const INTEREST_QUESTION: &str = "No que você está interessado?";

/// Portfolio page per service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Portfolio {
    pub website: String,
    pub chatbot: String,
    pub ecommerce: String,
    pub hosting: String,
}

impl Default for Portfolio {
    fn default() -> Self {
        Self {
            website: "https://henriquecassisdev.com/portfolio-websites".to_string(),
            chatbot: "https://henriquecassisdev.com/portfolio-chatbots".to_string(),
            ecommerce: "https://henriquecassisdev.com/portfolio-ecommerce".to_string(),
            hosting: "https://henriquecassisdev.com/hospedagem".to_string(),
        }
    }
}

/// Outbound resources and the names the assistant speaks about
///
/// Missing keys in a directory file fall back to these defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteDirectory {
    /// How the assistant refers to its creator
    pub owner: String,
    /// Full credit line shown after the greeting
    pub credit: String,
    pub whatsapp_url: String,
    pub email: String,
    pub phone_url: String,
    pub phone_label: String,
    pub linkedin_url: String,
    pub instagram_url: String,
    pub calendly_url: String,
    pub blog_url: String,
    pub portfolio: Portfolio,
}

impl Default for SiteDirectory {
    fn default() -> Self {
        Self {
            owner: "Henrique".to_string(),
            credit: "Henrique Cassis do HenriqueCassisDev.com".to_string(),
            whatsapp_url: "https://wa.me/5519996432877".to_string(),
            email: "henriquecassisdev@gmail.com".to_string(),
            phone_url: "tel:+5519996432877".to_string(),
            phone_label: "+55 19 99999-9999".to_string(),
            linkedin_url: "https://www.linkedin.com/in/henrique-cassis-bb6b0920b/".to_string(),
            instagram_url: "https://www.instagram.com/henrique.cassis".to_string(),
            calendly_url: "https://calendly.com/henriquecassisdev".to_string(),
            blog_url: "https://henriquecassisdev.com/blog".to_string(),
            portfolio: Portfolio::default(),
        }
    }
}

/// Services offered from the interest menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Website,
    Chatbot,
    Ecommerce,
    Hosting,
}

impl Service {
    pub fn label(self) -> &'static str {
        match self {
            Service::Website => "Website",
            Service::Chatbot => "Chatbot",
            Service::Ecommerce => "e-Commerce",
            Service::Hosting => "Hospedagem",
        }
    }

    pub fn portfolio_url(self, directory: &SiteDirectory) -> &str {
        match self {
            Service::Website => &directory.portfolio.website,
            Service::Chatbot => &directory.portfolio.chatbot,
            Service::Ecommerce => &directory.portfolio.ecommerce,
            Service::Hosting => &directory.portfolio.hosting,
        }
    }
}

/// Contact channels from the contact menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    WhatsApp,
    Email,
    Phone,
    LinkedIn,
    Instagram,
}

/// Canned FAQ topics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaqTopic {
    Cost,
    Deadline,
    Maintenance,
    Payment,
}

impl FaqTopic {
    pub fn answer(self, directory: &SiteDirectory) -> String {
        let owner = &directory.owner;
        match self {
            FaqTopic::Cost => format!(
                "O custo de um site ou projeto varia muito dependendo da complexidade, recursos e tempo de desenvolvimento. Para um orçamento preciso, sugiro agendar uma conversa com o {owner}!"
            ),
            FaqTopic::Deadline => "O prazo de entrega é definido após a análise detalhada do projeto, pois cada solução é personalizada. Em média, um site simples pode levar de 3 a 5 semanas.".to_string(),
            FaqTopic::Maintenance => "Sim, oferecemos serviços de manutenção e suporte contínuo para garantir que seu site ou chatbot esteja sempre atualizado e funcionando perfeitamente.".to_string(),
            FaqTopic::Payment => format!(
                "Aceitamos diversas formas de pagamento, incluindo Pix, transferência bancária e cartões de crédito. Detalhes podem ser combinados diretamente com o {owner}."
            ),
        }
    }
}

// ============================================================================
// Reusable message blocks
// ============================================================================

pub fn ask_name() -> Vec<Effect> {
    vec![Effect::text("Olá! Qual é o seu nome?", Pacing::ms(0, 800))]
}

pub fn invalid_name() -> Vec<Effect> {
    vec![Effect::text(
        "Hmm, esse nome parece um pouco incomum. Por favor, digite um nome válido para eu te conhecer melhor.",
        Pacing::ms(1200, 600),
    )]
}

pub fn greeting(name: &str, directory: &SiteDirectory) -> Vec<Effect> {
    vec![
        Effect::text(format!("Prazer em conhecê-lo, {name}! :D"), Pacing::ms(1000, 800)),
        Effect::text(
            format!("Eu sou um assistente virtual criado por {}", directory.credit),
            Pacing::ms(1500, 800),
        ),
    ]
}

pub fn main_menu(name: &str) -> Vec<Effect> {
    vec![
        Effect::text(format!("Como posso te ajudar hoje, {name}?"), Pacing::ms(1000, 500)),
        Effect::options(MAIN_MENU),
    ]
}

pub fn interest_menu() -> Vec<Effect> {
    vec![
        Effect::text(INTEREST_QUESTION, Pacing::immediate()),
        Effect::options(INTEREST_OPTIONS),
    ]
}

pub fn farewell(name: &str) -> Vec<Effect> {
    vec![
        Effect::text(
            format!("Entendido! Obrigado por conversar comigo, {name}! 😊"),
            Pacing::ms(1200, 600),
        ),
        Effect::text(
            "Se precisar de algo mais, estou à disposição. Tenha um ótimo dia!",
            Pacing::ms(1500, 800),
        ),
    ]
}

pub fn not_understood(name: &str) -> Vec<Effect> {
    vec![
        Effect::text(
            format!("Desculpe {name}, não consegui entender sua resposta."),
            Pacing::ms(1000, 500),
        ),
        Effect::text(
            "Por favor, selecione uma das opções ou digite uma palavra-chave.",
            Pacing::ms(1500, 800),
        ),
    ]
}

pub fn not_understood_menu(name: &str) -> Vec<Effect> {
    vec![
        Effect::text(format!("Desculpe {name}, não entendi a opção."), Pacing::ms(1000, 500)),
        Effect::text(
            "Por favor, selecione uma das opções do menu principal.",
            Pacing::ms(1500, 800),
        ),
    ]
}

pub fn anything_else() -> Vec<Effect> {
    vec![
        Effect::text("Posso te ajudar com mais alguma coisa?", Pacing::ms(1000, 500)),
        Effect::options(YES_NO),
    ]
}

pub fn idle_nudge(name: &str) -> Vec<Effect> {
    vec![Effect::text(
        format!("Olá {name}! Estou aqui se precisar de algo. Quer continuar a conversa?"),
        Pacing::ms(1500, 800),
    )]
}

pub fn welcome_back(name: &str) -> Vec<Effect> {
    vec![Effect::text(
        format!("Que bom te ver novamente, {name}! Como posso ajudar hoje?"),
        Pacing::ms(1000, 500),
    )]
}

pub fn services_intro() -> Vec<Effect> {
    let mut effects = vec![Effect::text("Meu criador é especialista em:", Pacing::ms(800, 500))];
    effects.extend(interest_menu());
    effects
}

pub fn contact_intro(directory: &SiteDirectory) -> Vec<Effect> {
    vec![
        Effect::text(
            format!(
                "Certo! Você pode entrar em contato com o {} pelos seguintes canais:",
                directory.owner
            ),
            Pacing::ms(1000, 500),
        ),
        Effect::options(CONTACT_OPTIONS),
    ]
}

pub fn faq_intro() -> Vec<Effect> {
    vec![
        Effect::text(
            "Tenho algumas respostas para perguntas frequentes que podem te ajudar. Qual a sua dúvida?",
            Pacing::ms(1200, 600),
        ),
        Effect::options(FAQ_OPTIONS),
    ]
}

pub fn feedback_prompt() -> Vec<Effect> {
    vec![Effect::text(
        "Agradeço seu interesse em dar um feedback! Por favor, digite sua sugestão ou comentário:",
        Pacing::ms(1000, 500),
    )]
}

pub fn feedback_too_short() -> Vec<Effect> {
    vec![Effect::text(
        "Obrigado pelo seu feedback! Para que ele seja mais útil, poderia detalhar um pouco mais?",
        Pacing::ms(1200, 600),
    )]
}

pub fn feedback_received() -> Vec<Effect> {
    vec![Effect::text(
        "Seu feedback foi recebido com sucesso! Agradecemos muito a sua contribuição para melhorar nossos serviços.",
        Pacing::ms(1500, 800),
    )]
}

pub fn schedule(name: &str, directory: &SiteDirectory) -> Vec<Effect> {
    let mut effects = vec![
        Effect::text(
            format!(
                "Sim, {name}! Agendar uma conversa direta com o {} é uma ótima forma de discutir seu projeto em detalhes.",
                directory.owner
            ),
            Pacing::ms(1500, 800),
        ),
        Effect::text(
            "Você pode escolher o melhor horário e dia diretamente na agenda dele aqui:",
            Pacing::ms(1000, 500),
        ),
        Effect::link("Agendar Reunião Online", &directory.calendly_url),
    ];
    effects.extend(anything_else());
    effects
}

pub fn blog(name: &str, directory: &SiteDirectory) -> Vec<Effect> {
    let mut effects = vec![
        Effect::text(
            format!(
                "Sim, {name}! O {} compartilha muito conhecimento no blog dele.",
                directory.owner
            ),
            Pacing::ms(1200, 600),
        ),
        Effect::text(
            "Confira os últimos artigos e dicas sobre desenvolvimento, chatbots e e-commerce:",
            Pacing::ms(1000, 500),
        ),
        Effect::link("Acessar o Blog", &directory.blog_url),
    ];
    effects.extend(anything_else());
    effects
}

pub fn service_pitch(service: Service, directory: &SiteDirectory) -> Vec<Effect> {
    let label = service.label();
    vec![
        Effect::text(
            format!(
                "Excelente escolha! Para {label}, o {} tem soluções incríveis.",
                directory.owner
            ),
            Pacing::ms(1500, 800),
        ),
        Effect::text(format!("Aqui está o portfólio de {label}:"), Pacing::ms(800, 500)),
        Effect::link(
            format!("Ver portfólio de {label}"),
            service.portfolio_url(directory),
        ),
        Effect::text("Quer saber mais ou falar diretamente?", Pacing::ms(800, 500)),
        Effect::options(SERVICE_FOLLOW_UP),
    ]
}

pub fn whatsapp_follow_up(directory: &SiteDirectory) -> Vec<Effect> {
    vec![
        Effect::link("Conversar no WhatsApp", &directory.whatsapp_url),
        Effect::text(
            "Fico feliz em ajudar! Posso te ajudar com mais alguma coisa?",
            Pacing::ms(1000, 500),
        ),
        Effect::options(YES_NO),
    ]
}

pub fn contact_channel(channel: Channel, directory: &SiteDirectory) -> Vec<Effect> {
    let owner = &directory.owner;
    let more = "Posso te ajudar com mais algo?";
    let mut effects = match channel {
        Channel::WhatsApp => vec![
            Effect::link("Conversar no WhatsApp", &directory.whatsapp_url),
            Effect::text(
                format!("Aguarde o {owner} no WhatsApp! {more}"),
                Pacing::default(),
            ),
        ],
        Channel::Email => vec![
            Effect::text(format!("Envie um e-mail para o {owner}:"), Pacing::ms(800, 500)),
            Effect::link(&directory.email, format!("mailto:{}", directory.email)),
            Effect::text(more, Pacing::default()),
        ],
        Channel::Phone => vec![
            Effect::text(format!("Ligue para o {owner}:"), Pacing::ms(800, 500)),
            Effect::link(&directory.phone_label, &directory.phone_url),
            Effect::text(more, Pacing::default()),
        ],
        Channel::LinkedIn => vec![
            Effect::link("Perfil do LinkedIn", &directory.linkedin_url),
            Effect::text(
                format!("Conecte-se com o {owner} no LinkedIn! {more}"),
                Pacing::default(),
            ),
        ],
        Channel::Instagram => vec![
            Effect::link("Perfil do Instagram", &directory.instagram_url),
            Effect::text(
                format!("Siga o {owner} no Instagram! {more}"),
                Pacing::default(),
            ),
        ],
    };
    effects.push(Effect::options(YES_NO));
    effects
}

pub fn faq_answer(topic: FaqTopic, directory: &SiteDirectory) -> Vec<Effect> {
    vec![
        Effect::text(topic.answer(directory), Pacing::ms(1500, 800)),
        Effect::text(
            "Quer saber mais sobre outra pergunta frequente?",
            Pacing::ms(1000, 500),
        ),
        Effect::options(FAQ_FOLLOW_UP),
    ]
}
