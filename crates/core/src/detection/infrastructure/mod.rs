pub mod raw_detection_parser;
