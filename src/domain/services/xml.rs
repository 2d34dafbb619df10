// src/domain/services/xml.rs
//
// Fixed-schema XML rendering for the /processar/ endpoint and the
// XML-shaped error documents. Text content is escaped; the reference
// behavior interpolated raw text, which produces invalid documents.

use quick_xml::escape::escape;

/// Render the `<resposta>` document: summary plus keyword list, with
/// self-closing elements when either is empty.
pub fn render_resposta(resumo: &str, palavras: &[String]) -> String {
    let mut doc = String::from("<resposta>");

    if resumo.is_empty() {
        doc.push_str("<resumo />");
    } else {
        doc.push_str("<resumo>");
        doc.push_str(&escape(resumo));
        doc.push_str("</resumo>");
    }

    if palavras.is_empty() {
        doc.push_str("<palavras-chave />");
    } else {
        doc.push_str("<palavras-chave>");
        for palavra in palavras {
            doc.push_str("<palavra>");
            doc.push_str(&escape(palavra.as_str()));
            doc.push_str("</palavra>");
        }
        doc.push_str("</palavras-chave>");
    }

    doc.push_str("</resposta>");
    doc
}

/// Render a plain `<erro>` document with a single message.
pub fn render_erro(mensagem: &str) -> String {
    format!("<erro>{}</erro>", escape(mensagem))
}

/// Render the 422 validation document: one `<detalhe>` per field error,
/// each carrying the error location and message.
pub fn render_erros(campos: &[(&str, String)]) -> String {
    let mut doc = String::from("<erro>");
    for (local, mensagem) in campos {
        doc.push_str("<detalhe><local>");
        doc.push_str(&escape(*local));
        doc.push_str("</local><mensagem>");
        doc.push_str(&escape(mensagem.as_str()));
        doc.push_str("</mensagem></detalhe>");
    }
    doc.push_str("</erro>");
    doc
}
