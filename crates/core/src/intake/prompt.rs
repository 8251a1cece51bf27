//! Prompts sent to the language model.

use lexintake_domain::constants::{CONFIRMATION_MARKER, INTENT_UNKNOWN};
use lexintake_domain::FirmConfig;

/// Fixed first message shown to every visitor.
pub fn greeting(firm: &FirmConfig) -> String {
    format!(
        "Olá, seja bem-vindo ao {}! Para iniciar, preciso de seu *nome completo* e *telefone com DDD*.",
        firm.display_name
    )
}

/// System prompt that drives the whole conversation.
pub fn system_prompt(firm: &FirmConfig) -> String {
    let fallback_contact = firm
        .contact_phone
        .as_deref()
        .map(|phone| format!(" Você pode nos contatar pelo telefone {phone}."))
        .unwrap_or_default();

    format!(
        "Você é a assistente virtual do escritório {name}. Siga ESTRITAMENTE esta sequência:\n\
         \n\
         1. SAUDAÇÃO: \"{greeting}\"\n\
         2. VALIDAÇÃO: se faltar nome ou telefone, peça novamente com educação. \
         Com os dados completos, agradeça pelo nome e pergunte sobre qual assunto gostaria de conversar.\n\
         3. ASSUNTO: atendemos apenas {areas}. Nunca sugira áreas não listadas e não ofereça \
         diagnósticos jurídicos.\n\
         4. ENCERRAMENTO: com o contexto claro, pergunte se gostaria de agendar uma consulta. \
         Se não, responda: \"Estamos à disposição!{fallback_contact}\"\n\
         5. Quando o cliente informar dia e horário, responda com uma linha por atendimento:\n\
         {marker} Nome: <nome completo> | Horário: <DD/MM/AAAA às HHh> | Detalhes: <resumo>\n\
         \n\
         Se o cliente pedir urgência, escreva \"urgente\" no campo Horário.",
        name = firm.display_name,
        greeting = greeting(firm),
        areas = firm.practice_areas.join(", "),
        marker = CONFIRMATION_MARKER,
    )
}

/// One-shot classification prompt for the visitor's first message.
pub fn intent_prompt(message: &str, practice_areas: &[String]) -> String {
    format!(
        "Com base nesta mensagem de um possível cliente: \"{message}\", diga resumidamente \
         (1 linha) qual é o provável tema jurídico. Responda com uma destas categorias, se \
         possível: {}. Caso não seja possível classificar, diga apenas: \"{INTENT_UNKNOWN}\".",
        practice_areas.join(", ")
    )
}
