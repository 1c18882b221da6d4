pub mod track_assigner;
