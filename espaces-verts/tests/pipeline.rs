//! Test d'intégration du pipeline de normalisation complet
//!
//! Export brut synthétique → normalisation → vérification des invariants
//! du schéma, puis relecture du fichier écrit.

use std::path::PathBuf;

use espaces_verts::normalize::{normalize, ALLOWED_CATEGORIES};
use espaces_verts::{Dataset, Table};

const RAW_CSV: &str = "\
Identifiant espace vert;Nom de l'espace vert;Typologie d'espace vert;Catégorie;Adresse - Numéro;Adresse - Libellé voie;Code postal;Surface totale réelle (m²);Surface calculée (m²);Présence clôture;Ouvert 24h;Année de l'ouverture;Nombre d'entités;Geo point;URL Plan
101;Parc de Bercy;Parc paysager;Parc;128;Quai de Bercy;75012;140000;138500;Oui;Non;1997;1;48.8354, 2.3824;http://plan/101
102;Square des Batignolles;Square de quartier;Square;144 bis;Rue Cardinet;75017;9999;16500;Oui;Non;1862;1;48.8880, 2.3158;http://plan/102
103;Talus SNCF;Talus;Talus;;Petite Ceinture;75020;1200;;Non;;9999;0;;http://plan/103
104;Jardin illisible;Jardin suspendu;Jardin;12;Rue Verte;75108;820;800;Peut-être;Oui;1954;;coordonnées cassées;http://plan/104
105;Cimetière de Bagneux;Cimetière parisien;Cimetière;45;Avenue Marx Dormoy;92220;610000;605000;Oui;Non;1886;2;48.7967, 2.3103;http://plan/105
";

fn write_raw(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(name);
    std::fs::write(&path, RAW_CSV).unwrap();
    path
}

#[test]
fn test_pipeline_invariants() {
    let raw_path = write_raw("test_pipeline_raw.csv");
    let mut table = Table::read_csv(&raw_path).unwrap();
    let report = normalize(&mut table);
    std::fs::remove_file(&raw_path).ok();

    // Le Talus (hors liste) est écarté, tout le reste est retenu
    assert_eq!(report.rows_read, 5);
    assert_eq!(report.rows_kept, 4);
    assert_eq!(report.rows_dropped, 1);
    assert!((report.retention_pct() - 80.0).abs() < 0.01);

    let dataset = Dataset::from_table(&table);
    for space in dataset.records() {
        // Catégorie dans la liste fermée
        let categorie = space.categorie.as_deref().unwrap();
        assert!(ALLOWED_CATEGORIES.contains(&categorie), "{categorie}");

        // Aucune sentinelle 9999 survivante
        for surface in [
            space.surface_totale_reelle_m2,
            space.surface_calculee_m2,
            space.surface_horticole_m2,
        ] {
            assert_ne!(surface, Some(9999.0));
        }
        for annee in [
            space.annee_ouverture,
            space.annee_renovation,
            space.annee_changement_nom,
        ] {
            assert_ne!(annee, Some(9999));
        }

        // nb_entites toujours ≥ 1
        assert!(space.nb_entites >= 1);

        // lat/lon présentes ensemble ou absentes ensemble
        assert_eq!(space.latitude.is_some(), space.longitude.is_some());
    }

    // Le square avec surface sentinelle retombe sur la surface calculée
    let square = dataset
        .records()
        .iter()
        .find(|s| s.id == Some(102))
        .unwrap();
    assert_eq!(square.surface_totale_reelle_m2, None);
    assert_eq!(square.merged_surface_m2(), Some(16500.0));

    // Le jardin aux coordonnées cassées perd lat/lon mais reste présent
    let jardin = dataset
        .records()
        .iter()
        .find(|s| s.id == Some(104))
        .unwrap();
    assert!(!jardin.has_coordinates());
    assert_eq!(jardin.presence_cloture, None); // "Peut-être" → inconnu
    assert_eq!(report.coord_failures, 1);
}

#[test]
fn test_pipeline_writes_reloadable_csv() {
    let raw_path = write_raw("test_pipeline_reload_raw.csv");
    let mut table = Table::read_csv(&raw_path).unwrap();
    normalize(&mut table);
    std::fs::remove_file(&raw_path).ok();

    let out_path = std::env::temp_dir().join("test_pipeline_normalized.csv");
    table.write_csv(&out_path).unwrap();

    let reloaded = Table::read_csv(&out_path).unwrap();
    std::fs::remove_file(&out_path).ok();

    assert_eq!(reloaded.headers(), table.headers());
    assert_eq!(reloaded.len(), table.len());

    // Relecture typée identique
    let before = Dataset::from_table(&table);
    let after = Dataset::from_table(&reloaded);
    assert_eq!(before.records(), after.records());
}
