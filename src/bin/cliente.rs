// src/bin/cliente.rs
//
// Command-line client for the summarization service: one subcommand per
// endpoint, against a running server.

use serde::Deserialize;
use structopt::StructOpt;

use sumarize::domain::entities::Summary;

#[derive(StructOpt, Debug)]
#[structopt(name = "cliente", about = "Cliente da API de resumos")]
struct Opt {
    /// Endereço base da API
    #[structopt(short, long, default_value = "http://localhost:8000")]
    url: String,

    #[structopt(subcommand)]
    command: Command,
}

#[derive(StructOpt, Debug)]
enum Command {
    /// Cria um novo resumo enviando texto Markdown
    Criar { texto: String },
    /// Lista todos os resumos cadastrados
    Listar,
    /// Atualiza um resumo existente pelo ID
    Atualizar { id: i64, texto: String },
    /// Exclui um resumo pelo ID
    Deletar { id: i64 },
    /// Mostra as palavras-chave associadas a um resumo
    Palavras { id: i64 },
    /// Extrai palavras-chave de um texto sem salvar no banco
    Extrair { texto: String },
    /// Processa texto e imprime o resultado completo em XML
    Processar { texto: String },
}

#[derive(Debug, Deserialize)]
struct PalavrasResponse {
    palavras: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct MensagemResponse {
    mensagem: String,
}

#[derive(Debug, Deserialize)]
struct ErroResponse {
    detail: String,
}

fn formatar_resumo(resumo: &Summary) -> String {
    format!("ID: {}\nResumo: {}", resumo.id, resumo.texto)
}

fn formatar_palavras(palavras: &[String]) -> String {
    palavras
        .iter()
        .enumerate()
        .map(|(i, palavra)| format!("{}. {}", i + 1, palavra))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Failures arrive as `{"detail": ...}`; the XML-wrapped errors keep
/// their raw body.
fn extrair_detalhe(body: &str) -> String {
    serde_json::from_str::<ErroResponse>(body)
        .map(|erro| erro.detail)
        .unwrap_or_else(|_| body.to_string())
}

async fn imprimir_falha(response: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = response.status().as_u16();
    let body = response.text().await?;
    println!("Erro {}: {}", status, extrair_detalhe(&body));
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opt = Opt::from_args();
    let client = reqwest::Client::new();

    match opt.command {
        Command::Criar { texto } => {
            let response = client
                .post(format!("{}/resumir/", opt.url))
                .json(&serde_json::json!({ "texto": texto }))
                .send()
                .await?;
            if response.status().is_success() {
                let resumo: Summary = response.json().await?;
                println!("Resumo criado com sucesso!");
                println!("{}", formatar_resumo(&resumo));
            } else {
                imprimir_falha(response).await?;
            }
        }
        Command::Listar => {
            let response = client.get(format!("{}/resumos/", opt.url)).send().await?;
            if response.status().is_success() {
                let resumos: Vec<Summary> = response.json().await?;
                if resumos.is_empty() {
                    println!("Nenhum resumo cadastrado.");
                }
                for resumo in &resumos {
                    println!("{}\n", formatar_resumo(resumo));
                }
            } else {
                imprimir_falha(response).await?;
            }
        }
        Command::Atualizar { id, texto } => {
            let response = client
                .put(format!("{}/resumos/{}", opt.url, id))
                .json(&serde_json::json!({ "texto": texto }))
                .send()
                .await?;
            if response.status().is_success() {
                let resumo: Summary = response.json().await?;
                println!("Resumo atualizado com sucesso!");
                println!("{}", formatar_resumo(&resumo));
            } else {
                imprimir_falha(response).await?;
            }
        }
        Command::Deletar { id } => {
            let response = client
                .delete(format!("{}/resumos/{}", opt.url, id))
                .send()
                .await?;
            if response.status().is_success() {
                let confirmacao: MensagemResponse = response.json().await?;
                println!("{}", confirmacao.mensagem);
            } else {
                imprimir_falha(response).await?;
            }
        }
        Command::Palavras { id } => {
            let response = client
                .get(format!("{}/resumos/{}/palavras-chave", opt.url, id))
                .send()
                .await?;
            if response.status().is_success() {
                let palavras: PalavrasResponse = response.json().await?;
                println!("Palavras-chave do resumo {}:", id);
                println!("{}", formatar_palavras(&palavras.palavras));
            } else {
                imprimir_falha(response).await?;
            }
        }
        Command::Extrair { texto } => {
            let response = client
                .post(format!("{}/palavras-chaves/", opt.url))
                .json(&serde_json::json!({ "texto": texto }))
                .send()
                .await?;
            if response.status().is_success() {
                let palavras: PalavrasResponse = response.json().await?;
                println!("Palavras-chave encontradas:");
                println!("{}", formatar_palavras(&palavras.palavras));
            } else {
                imprimir_falha(response).await?;
            }
        }
        Command::Processar { texto } => {
            let response = client
                .post(format!("{}/processar/", opt.url))
                .json(&serde_json::json!({ "texto": texto }))
                .send()
                .await?;
            // success or failure, the body is an XML document
            let status = response.status();
            let body = response.text().await?;
            if status.is_success() {
                println!("{}", body);
            } else {
                println!("Erro {}: {}", status.as_u16(), body);
            }
        }
    }

    Ok(())
}
