mod color_and_logging_output;
mod filter_patch_by_change_type;
mod filter_patch_by_changed_lines;
mod limit_patch_to_pathspecs;
mod reject_invalid_arguments;
mod show_mode_change_for_executable_file;
mod show_nothing_for_identical_snapshots;
mod show_patch_for_added_and_deleted_files;
mod show_patch_with_hunks_for_modified_file;
mod store_blobs_in_objects_directory;
