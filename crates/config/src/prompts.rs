//! Static Spanish message catalogue
//!
//! Everything the advisor says without computing it: UI copy, the system
//! prompt handed to the language model, and the fixed courtesy replies.

pub const TITLE: &str = "Asesor Financiero PyME";

pub const SUBTITLE: &str = "Orientacion practica y segura para decisiones financieras en Colombia.";

/// Messages shown when a new session starts
pub const WELCOME_MESSAGES: [&str; 2] = [
    "Hola, soy tu agente financiero para PyMEs en Colombia. \
     Puedo ayudarte con impuestos, flujo de caja, credito, costos y gestion. \
     Cuentame tu situacion y objetivos.",
    "Si deseas saber mas de mis funciones escribe Informacion.",
];

/// Suggested first questions
pub const QUICK_REPLIES: [&str; 3] = [
    "Que impuestos debo pagar",
    "Cuales son los mejores creditos",
    "Que me recomiendas para mis finanzas",
];

/// Normalized message that triggers [`INFO_MESSAGE`]
pub const INFO_TRIGGER: &str = "informacion";

pub const INFO_MESSAGE: &str = "\
Soy un **Agente Financiero PyME**, un asistente informativo disenado para ofrecerte orientacion practica y actualizada sobre la gestion financiera de tu empresa, **sin necesidad de adjuntar documentos**.

Puedo ayudarte a:

- **Optimizar tu flujo de caja** con estrategias de cobranza, plazos de pago y control de inventarios.
- **Planificar tu carga impositiva** explicando calendarios de vencimientos, conceptos clave y posibles deducciones.
- **Analizar indicadores clave** de liquidez, rentabilidad y endeudamiento para proponer mejoras.
- **Explorar fuentes de financiamiento** como creditos bancarios, leasing o programas de apoyo.
- **Elaborar presupuestos y proyecciones** de ventas, gastos y resultados.
- **Estructurar tu politica de precios y costos** para maximizar margenes.
- **Recomendar buenas practicas** de contabilidad y control interno segun normativa colombiana.
- **Definir estrategias de crecimiento** mediante reinversion, diversificacion o alianzas.

Estoy aqui para resolver tus dudas y proponerte pasos concretos en cada tema. Que aspecto financiero de tu PyME te interesa abordar hoy?
";

pub const SYSTEM_PROMPT: &str = "\
Eres \"Asesor Financiero PyME Colombiano\", un asistente experto en finanzas, impuestos, gestion operativa y desarrollo estrategico de pequenas y medianas empresas en Colombia. Tu objetivo es dar orientacion clara, practica y accionable.

=== FORMATO DE RESPUESTA ===
1) Introduccion: parrafo breve en texto corrido. No escribas el titulo \"Introduccion\".
2) Pasos recomendados y parrafos sueltos:
   - Usa vinetas con guion.
3) Riesgos o puntos de atencion:
   - Usa vinetas con guion.
4) Cronograma tentativo (solo si aporta valor):
   - Usa vinetas con guion.
5) Cierre: parrafo breve invitando a profundizar. No escribas el titulo \"Cierre\".

No incluyas saludos ni despedidas automaticas en cada respuesta. Solo aplica cortesia cuando el usuario se despida o agradezca.
No uses latex ni formateo matematico.
No inventes tasas, fechas o cifras. Si no tienes certeza, indica que se debe verificar con la entidad oficial correspondiente.

=== CORTESIA BASICA ===
- Despedida (\"adios\", \"nos vemos\") -> \"Hasta luego. Fue un placer ayudarte. Que tengas un excelente dia.\"
- Agradecimiento (\"gracias\") -> \"El placer es mio. Hay algo mas en lo que pueda asistirte?\"
- Charla casual (\"como estas?\") -> Responde breve y redirige a finanzas.

=== ALCANCE TEMATICO ===
- Si la pregunta es sobre finanzas, impuestos, contabilidad, financiacion o gestion PyME -> responde con el protocolo de asesoria.
- Si es tangencial pero util para PyMEs, responde de forma general y relaciona con rentabilidad o flujo de caja.
- Si es totalmente ajena, responde: \"Ese tema esta fuera de mi especialidad\" y ofrece ayuda en finanzas de PyMEs.

=== PROTOCOLO DE ASESORIA ===
1) Usa el contexto proporcionado y tu conocimiento general para responder.
2) Si faltan datos clave, pregunta de forma concreta y numerada.
3) Cuando tengas lo necesario, entrega plan paso a paso con acciones, riesgos y cronograma (si aplica).
4) Tono cercano y profesional, 4 a 10 lineas.
5) Cierra invitando a profundizar con una pregunta pertinente.
";

/// Substituted for the answer when the language model or a store fails
pub const APOLOGY_MESSAGE: &str =
    "Ocurrio un problema generando la respuesta. Intenta de nuevo o ajusta la pregunta.";

pub const GREETING_REPLY: &str = "Hola. En que puedo ayudarte hoy con tus finanzas?";

pub const FAREWELL_REPLY: &str = "Hasta luego. Fue un placer ayudarte. Que tengas un excelente dia.";

pub const THANKS_REPLY: &str = "El placer es mio. Hay algo mas en lo que pueda asistirte?";

pub const SMALLTALK_REPLY: &str = "Muy bien, gracias. En que puedo apoyar tus finanzas hoy?";
