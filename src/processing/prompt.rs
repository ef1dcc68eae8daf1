//! Instruction templates for the Gemini call.
//!
//! One fixed template per output mode; the two are never combined. The app
//! targets Portuguese-language meetings, so the instructions are written in
//! Portuguese.

use super::OutputMode;

/// Literal transcription instruction.
const TRANSCRIPTION_INSTRUCTION: &str =
    "Transcreva o áudio enviado em português, mantendo a estrutura de falas de forma clara.";

/// Structured meeting-minutes instruction. The output contract (sections and
/// the task table layout) lives entirely in this template.
const SUMMARY_INSTRUCTION: &str = r#"Você recebeu o áudio de uma reunião. ### Instrução ###

Você é um assistente experiente em reuniões corporativas.
Sua tarefa é analisar a transcrição da reunião fornecida e criar uma ata estruturada.

### Objetivo ###

A ata deve conter os seguintes elementos:

1. **Resumo geral da reunião**
   Um parágrafo introdutório com os temas centrais abordados.

2. **Principais pontos discutidos**
   Listados de forma clara e objetiva.

3. **Tarefas identificadas**
   Apresente cada tarefa no seguinte formato:

   | Nome da Tarefa | Responsável         | Prazo           | Ações para realizar a tarefa                          |
   |----------------|----------------------|------------------|--------------------------------------------------------|
   | [Título claro] | [Nome ou "Não especificado"] | [Data ou "Não especificado"] | - [Passo 1] <br> - [Passo 2] <br> - [Passo 3] ... |

4. **Decisões tomadas**
   Liste acordos ou resoluções formalmente decididas no encontro.

5. **Próximos passos**
   Indique o que precisa ser feito após a reunião.

---

### Instruções específicas ###

- Use **linguagem formal e objetiva**.
- **Não invente informações**: apenas utilize dados reais da transcrição.
- Quando algum item estiver indefinido (como responsável ou prazo), informe como **"Não especificado"**.
- Formate a saída em **Markdown**, mantendo a tabela das tarefas como mostrado acima.

---"#;

/// The instruction text sent to Gemini for the given mode.
pub fn instruction_for(mode: OutputMode) -> &'static str {
    match mode {
        OutputMode::Transcription => TRANSCRIPTION_INSTRUCTION,
        OutputMode::Summary => SUMMARY_INSTRUCTION,
    }
}
