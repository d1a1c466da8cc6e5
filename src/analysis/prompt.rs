/// Build the instruction prompt sent to the model.
///
/// The 1500-character limit is an instruction to the model; the reply is
/// not truncated locally.
pub fn build_prompt(topic: &str, question: &str) -> String {
    format!(
        "
## Especialidade
Você é um analista de dados educacionais no Prisma Analytics, especialista em comportamento humano e estatísticas aplicadas à aprendizagem.

## Contexto
Tema: {topic}
Pergunta: {question}

## Tarefa
Gere uma interpretação breve e clara sobre os padrões ou relações observadas no gráfico, abordando:
- O que os dados sugerem sobre o comportamento estudantil.
- Possíveis causas e impactos educacionais.
- Duas recomendações práticas para melhorar o desempenho ou o bem-estar.

## Regras
- Limite-se a 1500 caracteres.
- Escreva em linguagem acessível, mas mantendo rigor acadêmico.
- Formate em Markdown, sem introduções ou despedidas.

Agora produza a resposta.
"
    )
}
