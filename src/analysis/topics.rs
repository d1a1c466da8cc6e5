//! Topic catalogue and chart assets.
//!
//! Each topic has a pre-rendered chart under the assets directory. Topics
//! outside the fixed set still get analysed, but show the default chart.

pub const DEFAULT_ASSET: &str = "FOA-JPG.jpg";
pub const PLACEHOLDER_ASSET: &str = "placeholder.png";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Rotina,
    Conexoes,
    Foco,
    Habitos,
    Motivacao,
    Tecnologia,
    Bemestar,
    Grupo,
    Metas,
    Criatividade,
}

impl Topic {
    pub const ALL: [Topic; 10] = [
        Topic::Rotina,
        Topic::Conexoes,
        Topic::Foco,
        Topic::Habitos,
        Topic::Motivacao,
        Topic::Tecnologia,
        Topic::Bemestar,
        Topic::Grupo,
        Topic::Metas,
        Topic::Criatividade,
    ];

    /// Identifier used in prompts, asset names and export file names.
    pub fn id(&self) -> &'static str {
        match self {
            Topic::Rotina => "rotina",
            Topic::Conexoes => "conexoes",
            Topic::Foco => "foco",
            Topic::Habitos => "habitos",
            Topic::Motivacao => "motivacao",
            Topic::Tecnologia => "tecnologia",
            Topic::Bemestar => "bemestar",
            Topic::Grupo => "grupo",
            Topic::Metas => "metas",
            Topic::Criatividade => "criatividade",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Topic::Rotina => "Rotina de estudos",
            Topic::Conexoes => "Conexões sociais",
            Topic::Foco => "Foco e concentração",
            Topic::Habitos => "Hábitos de aprendizagem",
            Topic::Motivacao => "Motivação",
            Topic::Tecnologia => "Uso de tecnologia",
            Topic::Bemestar => "Bem-estar",
            Topic::Grupo => "Trabalho em grupo",
            Topic::Metas => "Metas e objetivos",
            Topic::Criatividade => "Criatividade",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.id() == id)
    }

    fn asset_file(&self) -> String {
        format!("grafico_{}.png", self.id())
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Resolves topic identifiers to chart paths under one assets directory.
#[derive(Debug, Clone)]
pub struct AssetCatalog {
    base_dir: String,
}

impl AssetCatalog {
    pub fn new(base_dir: impl Into<String>) -> Self {
        let base_dir = base_dir.into();
        Self {
            base_dir: base_dir.trim_end_matches('/').to_string(),
        }
    }

    fn join(&self, file: &str) -> String {
        format!("{}/{}", self.base_dir, file)
    }

    /// Chart for a topic id; unknown ids get the default chart.
    pub fn chart_for(&self, topic: &str) -> String {
        match Topic::from_id(topic) {
            Some(t) => self.join(&t.asset_file()),
            None => self.default_chart(),
        }
    }

    pub fn default_chart(&self) -> String {
        self.join(DEFAULT_ASSET)
    }

    /// Chart shown before anything is submitted.
    pub fn placeholder(&self) -> String {
        self.join(PLACEHOLDER_ASSET)
    }
}

impl Default for AssetCatalog {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_ASSETS_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_topic_maps_to_its_chart() {
        let catalog = AssetCatalog::default();
        for topic in Topic::ALL {
            assert_eq!(
                catalog.chart_for(topic.id()),
                format!("./assets/grafico_{}.png", topic.id())
            );
        }
    }

    #[test]
    fn test_grupo_chart() {
        assert_eq!(
            AssetCatalog::default().chart_for("grupo"),
            "./assets/grafico_grupo.png"
        );
    }

    #[test]
    fn test_unknown_topic_uses_default_chart() {
        let catalog = AssetCatalog::default();
        assert_eq!(catalog.chart_for("desconhecido"), "./assets/FOA-JPG.jpg");
        assert_eq!(catalog.chart_for(""), "./assets/FOA-JPG.jpg");
    }

    #[test]
    fn test_custom_base_dir() {
        let catalog = AssetCatalog::new("/srv/prisma/assets/");
        assert_eq!(catalog.chart_for("foco"), "/srv/prisma/assets/grafico_foco.png");
        assert_eq!(catalog.placeholder(), "/srv/prisma/assets/placeholder.png");
    }

    #[test]
    fn test_from_id_roundtrip() {
        for topic in Topic::ALL {
            assert_eq!(Topic::from_id(topic.id()), Some(topic));
        }
        assert_eq!(Topic::from_id("Foco"), None);
    }
}
